//! Fixed startup data: marketplace castings and demo identities.
//!
//! Loaded once at startup; nothing here is written back.

use crate::domain::{Casting, CastingStatus, DemoUser, NewCasting, Role, User, UserRole};
use chrono::NaiveDate;

pub const DEMO_PASSWORD: &str = "demo";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn role(id: &str, name: &str, description: &str, ages: (u8, u8), gender: &str) -> Role {
    Role {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        age_min: Some(ages.0),
        age_max: Some(ages.1),
        gender: gender.to_string(),
        talents_needed: 1,
        ..Role::default()
    }
}

/// One seeded casting: payload, fixed id and the counters it starts with.
fn seeded(
    id: u32,
    applications: u32,
    views: u32,
    created: NaiveDate,
    casting: NewCasting,
) -> Casting {
    let mut c = casting.into_casting(id, created);
    c.applications = applications;
    c.views = views;
    c
}

pub fn castings() -> Vec<Casting> {
    vec![
        seeded(
            1,
            45,
            320,
            date(2024, 1, 10),
            NewCasting {
                title: "Lead Role - Historical Drama Series".into(),
                production: "Carthage Productions".into(),
                casting_type: "TV Series".into(),
                category: "tv".into(),
                location: "Tunis".into(),
                deadline: Some(date(2024, 8, 15)),
                description: "Seeking male actor, 25-35 years old, for lead role in historical \
                              drama series about ancient Carthage."
                    .into(),
                requirements: strings(&[
                    "Professional acting experience",
                    "Fluent in Arabic and French",
                    "Available for 6 months",
                ]),
                compensation: "Professional rate".into(),
                status: CastingStatus::Active,
                production_dates: Some("September 2024 - February 2025".into()),
                shooting_locations: strings(&["Tunis", "Carthage", "El Jem"]),
                paid: Some(true),
                languages: strings(&["Arabic", "French"]),
                roles: vec![
                    Role {
                        role_type: "lead".into(),
                        skills: strings(&["Horse riding", "Stage combat"]),
                        languages: strings(&["Arabic", "French"]),
                        experience_level: Some("Professional".into()),
                        shooting_dates: Some("Sept 2024 - Feb 2025".into()),
                        compensation: Some("Professional rate".into()),
                        ..role(
                            "role-1-1",
                            "Hannibal",
                            "Young general, charismatic and determined.",
                            (25, 35),
                            "Male",
                        )
                    },
                    Role {
                        role_type: "supporting".into(),
                        talents_needed: 2,
                        ..role(
                            "role-1-2",
                            "Senate Advisor",
                            "Seasoned politician of the Carthaginian senate.",
                            (45, 65),
                            "Any",
                        )
                    },
                ],
                ..NewCasting::default()
            },
        ),
        seeded(
            2,
            32,
            180,
            date(2024, 1, 12),
            NewCasting {
                title: "Supporting Actress - Romantic Comedy".into(),
                production: "Sidi Bou Said Films".into(),
                casting_type: "Feature Film".into(),
                category: "film".into(),
                location: "Sidi Bou Said".into(),
                deadline: Some(date(2024, 8, 20)),
                description: "Looking for talented actress, 20-30 years old, for supporting \
                              role in romantic comedy."
                    .into(),
                requirements: strings(&[
                    "Acting experience preferred",
                    "Comfortable with comedy",
                    "Available for 2 months",
                ]),
                compensation: "Competitive pay".into(),
                status: CastingStatus::Active,
                paid: Some(true),
                roles: vec![Role {
                    role_type: "supporting".into(),
                    experience_level: Some("Intermediate".into()),
                    ..role(
                        "role-2-1",
                        "Leila",
                        "The lead's witty best friend.",
                        (20, 30),
                        "Female",
                    )
                }],
                ..NewCasting::default()
            },
        ),
        seeded(
            3,
            28,
            95,
            date(2024, 1, 15),
            NewCasting {
                title: "Ensemble Cast - Modern Theater".into(),
                production: "National Theater of Tunisia".into(),
                casting_type: "Theater".into(),
                category: "theater".into(),
                location: "Tunis".into(),
                deadline: Some(date(2024, 8, 25)),
                description: "Multiple roles available for contemporary theater production \
                              exploring modern Tunisian society."
                    .into(),
                requirements: strings(&[
                    "Theater experience required",
                    "Strong stage presence",
                    "Available for rehearsals",
                ]),
                compensation: "Theater standard".into(),
                status: CastingStatus::Active,
                roles: vec![
                    Role {
                        role_type: "lead".into(),
                        ..role(
                            "role-3-1",
                            "Mother",
                            "Head of a Tunis family facing change.",
                            (40, 55),
                            "Female",
                        )
                    },
                    Role {
                        role_type: "ensemble".into(),
                        talents_needed: 4,
                        ..role(
                            "role-3-2",
                            "Chorus",
                            "Ensemble members who sing and move on stage.",
                            (18, 40),
                            "Any",
                        )
                    },
                ],
                ..NewCasting::default()
            },
        ),
        seeded(
            4,
            67,
            245,
            date(2024, 1, 8),
            NewCasting {
                title: "Commercial Models - Fashion Brand".into(),
                production: "Medina Fashion House".into(),
                casting_type: "Commercial".into(),
                category: "commercial".into(),
                location: "Sousse".into(),
                deadline: Some(date(2024, 8, 10)),
                description: "Seeking diverse models for upcoming fashion campaign featuring \
                              traditional and modern styles."
                    .into(),
                requirements: strings(&[
                    "Modeling experience",
                    "Height 170cm+",
                    "Professional portfolio",
                ]),
                compensation: "Day rate + usage".into(),
                status: CastingStatus::Active,
                paid: Some(true),
                required_documents: strings(&["Portfolio", "Recent headshots"]),
                roles: vec![Role {
                    role_type: "model".into(),
                    talents_needed: 6,
                    appearance: Some("Height 170cm+".into()),
                    ..role(
                        "role-4-1",
                        "Campaign Model",
                        "Runway and print work for the summer collection.",
                        (18, 35),
                        "Any",
                    )
                }],
                ..NewCasting::default()
            },
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo(
    id: &str,
    email: &str,
    name: &str,
    role: UserRole,
    has_subscription: bool,
    label: &'static str,
    description: &'static str,
    bio: &str,
    location: &str,
    phone: &str,
) -> DemoUser {
    DemoUser {
        user: User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: Some(role),
            has_subscription,
            avatar: None,
            bio: Some(bio.to_string()),
            location: Some(location.to_string()),
            phone: Some(phone.to_string()),
        },
        password: DEMO_PASSWORD,
        label,
        description,
    }
}

pub fn demo_users() -> Vec<DemoUser> {
    vec![
        demo(
            "demo-talent-sub",
            "talent@demo.tn",
            "Amira Ben Salah",
            UserRole::Talent,
            true,
            "Talent (subscribed)",
            "Professional actress with an active subscription: full access to applications.",
            "Actress and model based in Tunis. 5 years of film and theater experience.",
            "Tunis, Tunisia",
            "+216 50 123 456",
        ),
        demo(
            "demo-talent-free",
            "free@demo.tn",
            "Karim Hammami",
            UserRole::Talent,
            false,
            "Talent (not subscribed)",
            "Beginner actor without subscription: exercises the application paywall.",
            "Young actor, graduate of the Tunis conservatory.",
            "Sousse, Tunisia",
            "+216 55 987 654",
        ),
        demo(
            "demo-producer",
            "producer@demo.tn",
            "Nadia Bouazizi",
            UserRole::Producer,
            true,
            "Producer",
            "Casting director: manages projects and reviews applications.",
            "Casting director at Carthage Productions. 10 years of experience.",
            "Tunis, Tunisia",
            "+216 71 234 567",
        ),
        demo(
            "demo-admin",
            "admin@demo.tn",
            "Slim Trabelsi",
            UserRole::Admin,
            true,
            "Administrator",
            "Administrator access: full platform supervision.",
            "Administrator of the Tunisia Casting platform.",
            "Tunis, Tunisia",
            "+216 71 000 000",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_castings_have_unique_ids_and_roles() {
        let castings = castings();
        let ids: HashSet<_> = castings.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), castings.len());
        for c in &castings {
            assert!(!c.roles.is_empty(), "casting {} has no roles", c.id);
            let role_ids: HashSet<_> = c.roles.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(role_ids.len(), c.roles.len());
        }
        assert_eq!(castings[0].applications, 45);
        assert_eq!(castings[0].views, 320);
    }

    #[test]
    fn test_demo_users_cover_every_role() {
        let users = demo_users();
        let ids: Vec<_> = users.iter().map(|d| d.user.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "demo-talent-sub",
                "demo-talent-free",
                "demo-producer",
                "demo-admin"
            ]
        );
        assert!(users.iter().all(|d| d.password == DEMO_PASSWORD));
        assert!(!users[1].user.has_subscription);
    }
}
