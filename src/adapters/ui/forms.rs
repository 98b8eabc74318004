//! Multi-step inquire forms: casting wizard, casting edit, profile and role application.
//!
//! Every form returns `Ok(None)` when the user backs out with Esc.

use crate::domain::queries::category_for_type;
use crate::domain::validation::{validate_age, validate_phone};
use crate::domain::{
    Casting, CastingPatch, DomainError, NewApplication, NewCasting, Role, User, UserRole,
};
use crate::usecases::ProfileUpdate;
use chrono::NaiveDate;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, InquireError, Select, Text};

pub type InquireResult<T> = Result<T, InquireError>;

/// Esc and Ctrl-C back out of the current screen; anything else is a real failure.
pub fn cancelled<T>(res: InquireResult<T>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Unwrap a prompt result or leave the enclosing form with `Ok(None)`.
macro_rules! ask {
    ($prompt:expr) => {
        match cancelled($prompt)? {
            Some(v) => v,
            None => return Ok(None),
        }
    };
}

pub const CASTING_TYPES: &[&str] = &[
    "TV Series",
    "Feature Film",
    "Short Film",
    "Theater",
    "Commercial",
    "Music Video",
];
const ROLE_TYPES: &[&str] = &["lead", "supporting", "extra", "ensemble", "model", "voice"];
const GENDERS: &[&str] = &["Any", "Female", "Male"];
const EXPERIENCE_LEVELS: &[&str] = &["Any", "Beginner", "Intermediate", "Professional"];

/// Comma separated input to a clean list.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

fn non_empty(input: &str) -> Option<String> {
    let t = input.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn required_text(message: &str) -> Text<'_, '_> {
    Text::new(message).with_validator(|input: &str| {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("This field is required".into()))
        } else {
            Ok(Validation::Valid)
        }
    })
}

fn date_text(message: &str) -> Text<'_, '_> {
    Text::new(message)
        .with_help_message("YYYY-MM-DD, leave empty to skip")
        .with_validator(|input: &str| {
            if input.trim().is_empty() || parse_date(input).is_some() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Expected a date like 2024-08-15".into()))
            }
        })
}

fn age_text(message: &str) -> Text<'_, '_> {
    Text::new(message)
        .with_help_message("leave empty for no limit")
        .with_validator(|input: &str| match validate_age(input) {
            Ok(_) => Ok(Validation::Valid),
            Err(e) => Ok(Validation::Invalid(e.to_string().into())),
        })
}

/// Maximum age must not undercut an already entered minimum. Malformed input is left
/// to the `age_text` validator.
fn max_age_validation(age_min: Option<u8>, input: &str) -> Validation {
    match (age_min, validate_age(input)) {
        (Some(min), Ok(Some(max))) if max < min => {
            Validation::Invalid(format!("Must be at least the minimum age ({})", min).into())
        }
        _ => Validation::Valid,
    }
}

/// Talent or producer, for accounts that are not demo identities.
pub fn pick_role(message: &str) -> Result<Option<UserRole>, DomainError> {
    let picked = ask!(Select::new(
        message,
        vec!["Talent looking for roles", "Producer casting a project"]
    )
    .raw_prompt());
    Ok(Some(if picked.index == 0 {
        UserRole::Talent
    } else {
        UserRole::Producer
    }))
}

/// How the wizard should store the casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    Publish,
    SaveDraft,
}

/// Project info, roles, media, preview. Returns the payload and how to store it.
pub fn casting_wizard() -> Result<Option<(NewCasting, WizardOutcome)>, DomainError> {
    println!("\nStep 1/4: project");
    let title = ask!(required_text("Project title:").prompt());
    let production = ask!(required_text("Production company:").prompt());
    let casting_type = ask!(Select::new("Type:", CASTING_TYPES.to_vec()).prompt()).to_string();
    let location = ask!(Text::new("Location:").prompt());
    let deadline = ask!(date_text("Application deadline:").prompt());
    let description = ask!(Text::new("Synopsis:").prompt());
    let requirements = ask!(Text::new("Requirements:")
        .with_help_message("comma separated")
        .prompt());
    let compensation = ask!(Text::new("Compensation:").prompt());
    let paid = ask!(Confirm::new("Paid production?").with_default(true).prompt());
    let production_dates = ask!(Text::new("Shooting dates:")
        .with_help_message("free text, e.g. September 2024")
        .prompt());
    let shooting_locations = ask!(Text::new("Shooting locations:")
        .with_help_message("comma separated")
        .prompt());

    println!("\nStep 2/4: roles");
    let mut roles = Vec::new();
    while ask!(Confirm::new("Add a role?")
        .with_default(roles.is_empty())
        .prompt())
    {
        match role_form(roles.len() + 1)? {
            Some(role) => roles.push(role),
            None => break,
        }
    }

    println!("\nStep 3/4: media");
    let audition_instructions = ask!(Text::new("Audition instructions:").prompt());
    let required_documents = ask!(Text::new("Required documents:")
        .with_help_message("comma separated, e.g. Headshot, CV, Showreel")
        .prompt());
    let additional_requirements = ask!(Text::new("Additional notes:").prompt());

    let casting = NewCasting {
        title: title.trim().to_string(),
        production: production.trim().to_string(),
        category: category_for_type(&casting_type),
        casting_type,
        location: location.trim().to_string(),
        deadline: parse_date(&deadline),
        description: description.trim().to_string(),
        requirements: split_list(&requirements),
        compensation: compensation.trim().to_string(),
        production_dates: non_empty(&production_dates),
        shooting_locations: split_list(&shooting_locations),
        additional_requirements: non_empty(&additional_requirements),
        audition_instructions: non_empty(&audition_instructions),
        required_documents: split_list(&required_documents),
        paid: Some(paid),
        roles,
        ..NewCasting::default()
    };

    println!("\nStep 4/4: preview");
    print_preview(&casting);
    let choice = ask!(Select::new(
        "Ready?",
        vec!["Publish now", "Save as draft", "Discard"]
    )
    .prompt());
    let outcome = match choice {
        "Publish now" => WizardOutcome::Publish,
        "Save as draft" => WizardOutcome::SaveDraft,
        _ => return Ok(None),
    };
    Ok(Some((casting, outcome)))
}

fn role_form(index: usize) -> Result<Option<Role>, DomainError> {
    let name = ask!(required_text("Role name:").prompt());
    let role_type = ask!(Select::new("Role type:", ROLE_TYPES.to_vec()).prompt());
    let description = ask!(Text::new("Role description:").prompt());
    let gender = ask!(Select::new("Gender:", GENDERS.to_vec()).prompt());
    let age_min = validate_age(&ask!(age_text("Minimum age:").prompt()))?;
    let age_max = ask!(age_text("Maximum age:")
        .with_validator(move |input: &str| Ok(max_age_validation(age_min, input)))
        .prompt());
    let experience = ask!(Select::new("Experience level:", EXPERIENCE_LEVELS.to_vec()).prompt());
    let skills = ask!(Text::new("Skills:")
        .with_help_message("comma separated")
        .prompt());
    let languages = ask!(Text::new("Languages:")
        .with_help_message("comma separated")
        .prompt());
    let talents_needed = ask!(CustomType::<u32>::new("Talents needed:")
        .with_default(1)
        .with_error_message("Enter a whole number")
        .prompt());
    let compensation = ask!(Text::new("Role compensation:")
        .with_help_message("leave empty to use the project's")
        .prompt());

    Ok(Some(Role {
        id: format!("role-{}", index),
        name: name.trim().to_string(),
        role_type: role_type.to_string(),
        description: description.trim().to_string(),
        age_min,
        age_max: validate_age(&age_max)?,
        gender: gender.to_string(),
        skills: split_list(&skills),
        languages: split_list(&languages),
        experience_level: (experience != "Any").then(|| experience.to_string()),
        talents_needed: talents_needed.max(1),
        compensation: non_empty(&compensation),
        ..Role::default()
    }))
}

fn print_preview(casting: &NewCasting) {
    println!("  {} ({})", casting.title, casting.casting_type);
    println!("  {} | {}", casting.production, casting.location);
    if let Some(deadline) = casting.deadline {
        println!("  Deadline: {}", deadline);
    }
    if !casting.requirements.is_empty() {
        println!("  Requirements: {}", casting.requirements.join(", "));
    }
    println!("  Roles: {}", casting.roles.len());
    for role in &casting.roles {
        println!(
            "    - {} [{}] {}, {}",
            role.name,
            role.role_type,
            role.gender,
            role.age_range()
        );
    }
}

/// Editable subset of a casting. Only fields that actually changed end up in the patch.
pub fn edit_form(casting: &Casting) -> Result<Option<CastingPatch>, DomainError> {
    let title = ask!(Text::new("Title:").with_initial_value(&casting.title).prompt());
    let location = ask!(Text::new("Location:")
        .with_initial_value(&casting.location)
        .prompt());
    let compensation = ask!(Text::new("Compensation:")
        .with_initial_value(&casting.compensation)
        .prompt());
    let current_deadline = casting
        .deadline
        .map(|d| d.to_string())
        .unwrap_or_default();
    let deadline = ask!(date_text("Deadline:")
        .with_initial_value(&current_deadline)
        .prompt());

    let changed = |new: &str, old: &str| {
        let new = new.trim();
        (!new.is_empty() && new != old).then(|| new.to_string())
    };
    Ok(Some(CastingPatch {
        title: changed(&title, &casting.title),
        location: changed(&location, &casting.location),
        compensation: changed(&compensation, &casting.compensation),
        deadline: deadline_change(casting.deadline, &deadline),
        ..CastingPatch::default()
    }))
}

/// `Some(None)` when a deadline was erased, `Some(Some(d))` when it moved.
fn deadline_change(current: Option<NaiveDate>, input: &str) -> Option<Option<NaiveDate>> {
    let new = parse_date(input);
    (new != current).then_some(new)
}

/// Name, bio, location and phone, prefilled from `user`. Empty bio, location or phone clears it.
pub fn profile_form(user: &User) -> Result<Option<ProfileUpdate>, DomainError> {
    let name = ask!(required_text("Full name:").with_initial_value(&user.name).prompt());
    let bio = ask!(Text::new("Bio:")
        .with_initial_value(user.bio.as_deref().unwrap_or_default())
        .prompt());
    let location = ask!(Text::new("City:")
        .with_initial_value(user.location.as_deref().unwrap_or_default())
        .prompt());
    let phone = ask!(Text::new("Phone:")
        .with_initial_value(user.phone.as_deref().unwrap_or_default())
        .with_help_message("e.g. +216 98 123 456, leave empty to remove")
        .with_validator(|input: &str| match validate_phone(input.trim()) {
            Ok(()) => Ok(Validation::Valid),
            Err(e) => Ok(Validation::Invalid(e.to_string().into())),
        })
        .prompt());

    Ok(Some(ProfileUpdate {
        name: Some(name),
        bio: Some(bio),
        location: Some(location),
        phone: Some(phone),
    }))
}

/// Application for one role, filled in on behalf of `user`.
pub fn application_form(
    casting: &Casting,
    role: &Role,
    user: &User,
) -> Result<Option<NewApplication>, DomainError> {
    println!("\nApplying to {} as {}", role.name, user.name);
    let cover_message = ask!(required_text("Cover message:")
        .with_help_message("why you fit this role")
        .prompt());
    let experience = ask!(Text::new("Relevant experience:").prompt());
    let availability = ask!(Text::new("Availability:").prompt());
    let photos = ask!(Text::new("Photo files:")
        .with_help_message("comma separated file names, e.g. headshot.jpg")
        .prompt());
    let video = ask!(Text::new("Video showreel file:").prompt());
    let portfolio = ask!(Text::new("Portfolio file:").prompt());

    Ok(Some(NewApplication {
        casting_id: casting.id,
        role_id: role.id.clone(),
        applicant_name: user.name.clone(),
        applicant_email: user.email.clone(),
        cover_message: cover_message.trim().to_string(),
        experience: experience.trim().to_string(),
        availability: availability.trim().to_string(),
        photo_files: split_list(&photos),
        video_showreel: non_empty(&video),
        portfolio_file: non_empty(&portfolio),
    }))
}
