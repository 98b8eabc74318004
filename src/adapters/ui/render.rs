//! Plain-text rendering of castings, stats, review lists and profiles.

use crate::domain::validation::{PasswordStrength, StrengthLevel};
use crate::domain::{Application, Casting, CastingStatus, DashboardStats, DomainError, User};
use crate::usecases::casting_service::RoleReview;
use crossterm::style::Stylize;

fn status_badge(status: CastingStatus) -> String {
    match status {
        CastingStatus::Active => "ACTIVE".green().to_string(),
        CastingStatus::Draft => "DRAFT".yellow().to_string(),
        CastingStatus::Closed => "CLOSED".dark_grey().to_string(),
    }
}

/// One line per casting, used as the Select label.
pub fn casting_line(casting: &Casting) -> String {
    format!(
        "#{} {} · {} · {} ({} roles)",
        casting.id,
        casting.title,
        casting.casting_type,
        casting.location,
        casting.roles.len()
    )
}

pub fn print_casting(casting: &Casting) {
    println!();
    println!("{}  {}", casting.title.as_str().bold(), status_badge(casting.status));
    println!("{} · {}", casting.production, casting.casting_type);
    println!("Location: {}", casting.location);
    match casting.deadline {
        Some(deadline) => println!("Deadline: {}", deadline),
        None => println!("Deadline: open"),
    }
    if !casting.compensation.is_empty() {
        println!("Compensation: {}", casting.compensation);
    }
    println!(
        "{} applications · {} views · posted {}",
        casting.applications, casting.views, casting.created_at
    );
    if !casting.description.is_empty() {
        println!("\n{}", casting.description);
    }
    if !casting.requirements.is_empty() {
        println!("\n{}", "Requirements".bold());
        for req in &casting.requirements {
            println!("  • {}", req);
        }
    }
    if let Some(instructions) = &casting.audition_instructions {
        println!("\n{} {}", "Audition:".bold(), instructions);
    }
    if !casting.roles.is_empty() {
        println!("\n{}", "Roles".bold());
        for role in &casting.roles {
            println!(
                "  {} [{}] {}, {}, {} needed",
                role.name.as_str().red(),
                role.role_type,
                role.gender,
                role.age_range(),
                role.talents_needed
            );
            if !role.description.is_empty() {
                println!("    {}", role.description);
            }
            if !role.languages.is_empty() {
                println!("    Languages: {}", role.languages.join(", "));
            }
        }
    }
    println!();
}

pub fn print_stats(stats: &DashboardStats) {
    println!();
    println!("{}", "Dashboard".bold());
    println!(
        "  castings {}  active {}  applications {}  views {}",
        stats.total_castings, stats.active_castings, stats.total_applications, stats.total_views
    );
    println!();
}

pub fn print_review(reviews: &[RoleReview]) {
    if reviews.is_empty() {
        println!("No roles or applications yet.");
        return;
    }
    for review in reviews {
        let name = review.role_name.as_deref().unwrap_or("(removed role)");
        println!(
            "\n{} ({} applications)",
            name.bold(),
            review.applications.len()
        );
        for app in &review.applications {
            println!(
                "  {} <{}> {}",
                app.applicant_name,
                app.applicant_email,
                app.submitted_at.format("%Y-%m-%d %H:%M")
            );
            println!("    {}", app.cover_message);
        }
    }
    println!();
}

pub fn print_user(user: &User) {
    let role = user
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "no role".to_string());
    let plan = if user.has_subscription {
        "subscribed"
    } else {
        "free"
    };
    println!("Signed in as {} <{}> ({}, {})", user.name, user.email, role, plan);
}

pub fn print_profile(user: &User) {
    println!();
    println!("{}", user.name.as_str().bold());
    println!("  Email:    {}", user.email);
    println!("  City:     {}", user.location.as_deref().unwrap_or("-"));
    println!("  Phone:    {}", user.phone.as_deref().unwrap_or("-"));
    if let Some(bio) = &user.bio {
        println!("\n  {}", bio);
    }
    println!();
}

/// A talent's submissions with the casting they went to.
pub fn print_my_applications(applications: &[Application], castings: &[Casting]) {
    if applications.is_empty() {
        println!("You have not applied to any casting yet.");
        return;
    }
    println!("\n{} ({})", "My applications".bold(), applications.len());
    for app in applications {
        let casting = castings.iter().find(|c| c.id == app.casting_id);
        let title = casting.map_or("(removed casting)", |c| c.title.as_str());
        let role = casting
            .and_then(|c| c.role(&app.role_id))
            .map_or(app.role_id.as_str(), |r| r.name.as_str());
        let state = casting.map_or_else(
            || "REMOVED".dark_grey().to_string(),
            |c| status_badge(c.status),
        );
        println!(
            "  {} · {}  {}  sent {}",
            title,
            role,
            state,
            app.submitted_at.format("%Y-%m-%d")
        );
    }
    println!();
}

fn strength_bar(score: u8) -> String {
    let filled = usize::from(score.min(5));
    format!("{}{}", "■".repeat(filled), "□".repeat(5 - filled))
}

/// Five-segment meter under the password prompt.
pub fn print_strength(strength: PasswordStrength) {
    let bar = strength_bar(strength.score);
    let line = match strength.level {
        StrengthLevel::None => return,
        StrengthLevel::Weak => format!("{} weak", bar).red(),
        StrengthLevel::Medium => format!("{} medium", bar).yellow(),
        StrengthLevel::Strong => format!("{} strong", bar).green(),
    };
    println!("Password strength: {}", line);
}

pub fn notice(message: &str) {
    println!("{}", message.green());
}

pub fn print_error(err: &DomainError) {
    eprintln!("{} {}", "error:".red().bold(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::password_strength;

    #[test]
    fn test_strength_bar() {
        assert_eq!(strength_bar(0), "□□□□□");
        assert_eq!(strength_bar(3), "■■■□□");
        assert_eq!(strength_bar(9), "■■■■■");
        assert_eq!(
            strength_bar(password_strength("Casting2024!").score),
            "■■■■■"
        );
    }
}
