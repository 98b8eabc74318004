//! Domain entities. Pure data structures for the core business.
//!
//! No UI/IO types here — adapters map their own representations into these.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CastingId = u32;

/// Publication state of a casting call.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CastingStatus {
    #[default]
    Active,
    Draft,
    Closed,
}

impl fmt::Display for CastingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CastingStatus::Active => "Active",
            CastingStatus::Draft => "Draft",
            CastingStatus::Closed => "Closed",
        };
        f.write_str(s)
    }
}

/// A character or position within a casting. Only identified inside its parent casting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: String,
    pub name: String,
    /// lead, supporting, extra, ... (free text)
    pub role_type: String,
    pub description: String,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub gender: String,
    pub ethnicity: Option<String>,
    pub appearance: Option<String>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub special_talents: Vec<String>,
    pub experience_level: Option<String>,
    pub talents_needed: u32,
    pub shooting_dates: Option<String>,
    pub location: Option<String>,
    pub compensation: Option<String>,
}

impl Role {
    /// Human readable age range, e.g. "25-35", "18+", "up to 12" or "any age".
    pub fn age_range(&self) -> String {
        match (self.age_min, self.age_max) {
            (Some(min), Some(max)) => format!("{}-{}", min, max),
            (Some(min), None) => format!("{}+", min),
            (None, Some(max)) => format!("up to {}", max),
            (None, None) => "any age".to_string(),
        }
    }
}

/// A posted casting call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casting {
    pub id: CastingId,
    pub title: String,
    pub production: String,
    #[serde(rename = "type")]
    pub casting_type: String,
    pub category: String,
    pub location: String,
    pub deadline: Option<NaiveDate>,
    pub description: String,
    pub requirements: Vec<String>,
    pub compensation: String,
    pub status: CastingStatus,
    /// Denormalized: bumped by the store on every submitted application.
    pub applications: u32,
    pub views: u32,
    pub created_at: NaiveDate,

    pub production_dates: Option<String>,
    pub shooting_locations: Vec<String>,
    pub additional_requirements: Option<String>,
    pub audition_instructions: Option<String>,
    pub required_documents: Vec<String>,
    pub paid: Option<bool>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    pub languages: Vec<String>,
    pub special_skills: Vec<String>,
    pub roles: Vec<Role>,
}

impl Casting {
    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }
}

/// Casting payload without id or counters. The store assigns both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCasting {
    pub title: String,
    pub production: String,
    #[serde(rename = "type")]
    pub casting_type: String,
    pub category: String,
    pub location: String,
    pub deadline: Option<NaiveDate>,
    pub description: String,
    pub requirements: Vec<String>,
    pub compensation: String,
    pub status: CastingStatus,
    /// Defaults to the insertion date when absent.
    pub created_at: Option<NaiveDate>,

    pub production_dates: Option<String>,
    pub shooting_locations: Vec<String>,
    pub additional_requirements: Option<String>,
    pub audition_instructions: Option<String>,
    pub required_documents: Vec<String>,
    pub paid: Option<bool>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    pub languages: Vec<String>,
    pub special_skills: Vec<String>,
    pub roles: Vec<Role>,
}

impl NewCasting {
    /// Materialize with an assigned id and zeroed counters.
    pub fn into_casting(self, id: CastingId, today: NaiveDate) -> Casting {
        Casting {
            id,
            title: self.title,
            production: self.production,
            casting_type: self.casting_type,
            category: self.category,
            location: self.location,
            deadline: self.deadline,
            description: self.description,
            requirements: self.requirements,
            compensation: self.compensation,
            status: self.status,
            applications: 0,
            views: 0,
            created_at: self.created_at.unwrap_or(today),
            production_dates: self.production_dates,
            shooting_locations: self.shooting_locations,
            additional_requirements: self.additional_requirements,
            audition_instructions: self.audition_instructions,
            required_documents: self.required_documents,
            paid: self.paid,
            age_min: self.age_min,
            age_max: self.age_max,
            gender: self.gender,
            experience: self.experience,
            languages: self.languages,
            special_skills: self.special_skills,
            roles: self.roles,
        }
    }
}

/// Field mask for partial casting updates. `None` leaves the field as is.
///
/// Optional detail fields (`production_dates`, `age_min`, ...) can be set but not
/// cleared through the mask. `deadline` is the exception: `Some(None)` removes it.
/// Over serde, a JSON `null` deadline reads as "unchanged".
/// The id is not part of the mask; it never changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastingPatch {
    pub title: Option<String>,
    pub production: Option<String>,
    #[serde(rename = "type")]
    pub casting_type: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub compensation: Option<String>,
    pub status: Option<CastingStatus>,
    pub applications: Option<u32>,
    pub views: Option<u32>,
    pub production_dates: Option<String>,
    pub shooting_locations: Option<Vec<String>>,
    pub additional_requirements: Option<String>,
    pub audition_instructions: Option<String>,
    pub required_documents: Option<Vec<String>>,
    pub paid: Option<bool>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    pub languages: Option<Vec<String>>,
    pub special_skills: Option<Vec<String>>,
    pub roles: Option<Vec<Role>>,
}

impl CastingPatch {
    pub fn status(status: CastingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge every provided field into `casting`.
    pub fn apply_to(self, casting: &mut Casting) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut casting.title, self.title);
        set(&mut casting.production, self.production);
        set(&mut casting.casting_type, self.casting_type);
        set(&mut casting.category, self.category);
        set(&mut casting.location, self.location);
        set(&mut casting.deadline, self.deadline);
        set(&mut casting.description, self.description);
        set(&mut casting.requirements, self.requirements);
        set(&mut casting.compensation, self.compensation);
        set(&mut casting.status, self.status);
        set(&mut casting.applications, self.applications);
        set(&mut casting.views, self.views);
        set_opt(&mut casting.production_dates, self.production_dates);
        set(&mut casting.shooting_locations, self.shooting_locations);
        set_opt(
            &mut casting.additional_requirements,
            self.additional_requirements,
        );
        set_opt(&mut casting.audition_instructions, self.audition_instructions);
        set(&mut casting.required_documents, self.required_documents);
        set_opt(&mut casting.paid, self.paid);
        set_opt(&mut casting.age_min, self.age_min);
        set_opt(&mut casting.age_max, self.age_max);
        set_opt(&mut casting.gender, self.gender);
        set_opt(&mut casting.experience, self.experience);
        set(&mut casting.languages, self.languages);
        set(&mut casting.special_skills, self.special_skills);
        set(&mut casting.roles, self.roles);
    }
}

/// A talent's submission against one role of one casting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub casting_id: CastingId,
    pub role_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_message: String,
    pub experience: String,
    pub availability: String,
    pub photo_files: Vec<String>,
    pub video_showreel: Option<String>,
    pub portfolio_file: Option<String>,
    /// Set by the store; never supplied by callers.
    pub submitted_at: DateTime<Utc>,
}

/// Application payload as submitted. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewApplication {
    pub casting_id: CastingId,
    pub role_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_message: String,
    pub experience: String,
    pub availability: String,
    pub photo_files: Vec<String>,
    pub video_showreel: Option<String>,
    pub portfolio_file: Option<String>,
}

impl NewApplication {
    pub fn into_application(self, id: String, submitted_at: DateTime<Utc>) -> Application {
        Application {
            id,
            casting_id: self.casting_id,
            role_id: self.role_id,
            applicant_name: self.applicant_name,
            applicant_email: self.applicant_email,
            cover_message: self.cover_message,
            experience: self.experience,
            availability: self.availability,
            photo_files: self.photo_files,
            video_showreel: self.video_showreel,
            portfolio_file: self.portfolio_file,
            submitted_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Talent,
    Producer,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Talent => "talent",
            UserRole::Producer => "producer",
            UserRole::Admin => "admin",
        };
        f.write_str(s)
    }
}

/// The logged-in account. `role: None` is an account that has not picked a side yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
    pub has_subscription: bool,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

/// Seeded identity selectable from the login screen.
#[derive(Debug, Clone)]
pub struct DemoUser {
    pub user: User,
    pub password: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Casting {
        NewCasting {
            title: "Lead".to_string(),
            production: "Carthage Productions".to_string(),
            casting_type: "TV Series".to_string(),
            ..NewCasting::default()
        }
        .into_casting(7, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
    }

    #[test]
    fn test_into_casting_zeroes_counters_and_defaults_date() {
        let c = sample();
        assert_eq!(c.id, 7);
        assert_eq!(c.applications, 0);
        assert_eq!(c.views, 0);
        assert_eq!(c.created_at, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(c.status, CastingStatus::Active);
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let mut c = sample();
        let before = c.clone();
        CastingPatch {
            location: Some("Sousse".to_string()),
            ..CastingPatch::default()
        }
        .apply_to(&mut c);

        assert_eq!(c.location, "Sousse");
        c.location = before.location.clone();
        assert_eq!(c, before);
    }

    #[test]
    fn test_patch_sets_and_clears_deadline() {
        let mut c = sample();
        let date = NaiveDate::from_ymd_opt(2024, 8, 15);
        CastingPatch {
            deadline: Some(date),
            ..CastingPatch::default()
        }
        .apply_to(&mut c);
        assert_eq!(c.deadline, date);

        CastingPatch::default().apply_to(&mut c);
        assert_eq!(c.deadline, date);

        CastingPatch {
            deadline: Some(None),
            ..CastingPatch::default()
        }
        .apply_to(&mut c);
        assert_eq!(c.deadline, None);
    }

    #[test]
    fn test_empty_patch() {
        assert!(CastingPatch::default().is_empty());
        assert!(!CastingPatch::status(CastingStatus::Closed).is_empty());
    }

    #[test]
    fn test_role_age_range() {
        let mut role = Role {
            age_min: Some(25),
            age_max: Some(35),
            ..Role::default()
        };
        assert_eq!(role.age_range(), "25-35");
        role.age_max = None;
        assert_eq!(role.age_range(), "25+");
        role.age_min = None;
        assert_eq!(role.age_range(), "any age");
    }
}
