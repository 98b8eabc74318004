//! Casting use cases: publish, edit, browse, apply, review.
//!
//! Wraps the registry port with the checks the registry itself does not make:
//! - required fields on publish (title, production, type)
//! - referential integrity on submit (casting exists, role belongs to it)
//! - unknown ids become `DomainError::NotFound` instead of silent no-ops

use crate::domain::queries::{
    DashboardStats, category_for_type, filter_castings, group_applications_by_role,
};
use crate::domain::validation::validate_required;
use crate::domain::{
    Application, Casting, CastingFilter, CastingId, CastingPatch, CastingStatus, DomainError,
    NewApplication, NewCasting, Role,
};
use crate::ports::CastingRepoPort;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Applications for one role, as shown on the producer review screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleReview {
    pub role_id: String,
    /// `None` when the role was removed from the casting after people applied.
    pub role_name: Option<String>,
    pub applications: Vec<Application>,
}

pub struct CastingService {
    repo: Arc<dyn CastingRepoPort>,
}

impl CastingService {
    pub fn new(repo: Arc<dyn CastingRepoPort>) -> Self {
        Self { repo }
    }

    /// Publish a casting as `Active`. Title, production and type are required;
    /// a blank category is derived from the type.
    pub async fn publish_casting(&self, casting: NewCasting) -> Result<Casting, DomainError> {
        check_publishable(&casting.title, &casting.production, &casting.casting_type)?;
        let casting = normalize(casting, CastingStatus::Active)?;

        let stored = self.repo.add_casting(casting).await?;
        info!(
            casting_id = stored.id,
            title = %stored.title,
            roles = stored.roles.len(),
            "casting published"
        );
        Ok(stored)
    }

    /// Save an unfinished casting as `Draft`. Only the title is required.
    pub async fn save_draft(&self, casting: NewCasting) -> Result<Casting, DomainError> {
        validate_required(&casting.title, "title")?;
        let casting = normalize(casting, CastingStatus::Draft)?;

        let stored = self.repo.add_casting(casting).await?;
        info!(casting_id = stored.id, title = %stored.title, "draft saved");
        Ok(stored)
    }

    /// Move a draft or closed casting to `Active`, under the same rules as
    /// `publish_casting`. Already active castings are returned unchanged.
    pub async fn publish_draft(&self, id: CastingId) -> Result<Casting, DomainError> {
        let casting = self.get_casting(id).await?;
        if casting.status == CastingStatus::Active {
            return Ok(casting);
        }
        check_publishable(&casting.title, &casting.production, &casting.casting_type)?;
        check_roles(&casting.roles)?;

        let mut patch = CastingPatch::status(CastingStatus::Active);
        if casting.category.trim().is_empty() {
            patch.category = Some(category_for_type(&casting.casting_type));
        }
        if !self.repo.update_casting(id, patch).await? {
            return Err(DomainError::not_found("casting", id));
        }
        info!(casting_id = id, title = %casting.title, "casting published");
        self.get_casting(id).await
    }

    /// Partial update. Activation is not a plain field change: a patch that would make
    /// an inactive casting `Active` is rejected in favour of `publish_draft`.
    pub async fn update_casting(
        &self,
        id: CastingId,
        patch: CastingPatch,
    ) -> Result<Casting, DomainError> {
        if let Some(roles) = &patch.roles {
            check_roles(roles)?;
        }
        if patch.status == Some(CastingStatus::Active) {
            let current = self.get_casting(id).await?;
            if current.status != CastingStatus::Active {
                return Err(DomainError::Validation(format!(
                    "casting {} is {}; publish it instead of patching the status",
                    id, current.status
                )));
            }
        }
        if !self.repo.update_casting(id, patch).await? {
            return Err(DomainError::not_found("casting", id));
        }
        info!(casting_id = id, "casting updated");
        self.get_casting(id).await
    }

    pub async fn close_casting(&self, id: CastingId) -> Result<Casting, DomainError> {
        self.update_casting(id, CastingPatch::status(CastingStatus::Closed))
            .await
    }

    pub async fn delete_casting(&self, id: CastingId) -> Result<(), DomainError> {
        if !self.repo.delete_casting(id).await? {
            return Err(DomainError::not_found("casting", id));
        }
        info!(casting_id = id, "casting deleted");
        Ok(())
    }

    pub async fn get_casting(&self, id: CastingId) -> Result<Casting, DomainError> {
        self.repo
            .get_casting(id)
            .await?
            .ok_or_else(|| DomainError::not_found("casting", id))
    }

    /// Open the detail view: counts a view, then returns the fresh record.
    pub async fn view_casting(&self, id: CastingId) -> Result<Casting, DomainError> {
        if !self.repo.record_view(id).await? {
            return Err(DomainError::not_found("casting", id));
        }
        self.get_casting(id).await
    }

    pub async fn list_castings(&self) -> Result<Vec<Casting>, DomainError> {
        self.repo.list_castings().await
    }

    /// Browse screen: filter over the whole registry.
    pub async fn search(&self, filter: &CastingFilter) -> Result<Vec<Casting>, DomainError> {
        let castings = self.repo.list_castings().await?;
        Ok(filter_castings(&castings, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Submit an application to an open casting. The role must belong to the casting
    /// and the cover message must not be blank.
    pub async fn submit_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, DomainError> {
        let casting = self.get_casting(application.casting_id).await?;
        if casting.status != CastingStatus::Active {
            return Err(DomainError::Validation(format!(
                "casting {} is not open for applications ({})",
                casting.id, casting.status
            )));
        }
        if casting.role(&application.role_id).is_none() {
            return Err(DomainError::not_found(
                "role",
                format!("{}/{}", casting.id, application.role_id),
            ));
        }
        validate_required(&application.cover_message, "cover message")?;

        let stored = self.repo.add_application(application).await?;
        info!(
            application_id = %stored.id,
            casting_id = stored.casting_id,
            role_id = %stored.role_id,
            "application submitted"
        );
        Ok(stored)
    }

    pub async fn applications_for_casting(
        &self,
        casting_id: CastingId,
    ) -> Result<Vec<Application>, DomainError> {
        self.repo.applications_for_casting(casting_id).await
    }

    pub async fn applications_for_role(
        &self,
        casting_id: CastingId,
        role_id: &str,
    ) -> Result<Vec<Application>, DomainError> {
        self.repo.applications_for_role(casting_id, role_id).await
    }

    /// Applications of a casting grouped per role: every current role in casting order
    /// (possibly empty), followed by role ids that only survive in applications.
    pub async fn review_by_role(&self, casting_id: CastingId) -> Result<Vec<RoleReview>, DomainError> {
        let casting = self.get_casting(casting_id).await?;
        let applications = self.repo.applications_for_casting(casting_id).await?;
        let groups = group_applications_by_role(&applications);

        let mut reviews: Vec<RoleReview> = casting
            .roles
            .iter()
            .map(|role| RoleReview {
                role_id: role.id.clone(),
                role_name: Some(role.name.clone()),
                applications: groups
                    .iter()
                    .find(|g| g.role_id == role.id)
                    .map(|g| g.applications.iter().map(|a| (*a).clone()).collect())
                    .unwrap_or_default(),
            })
            .collect();

        for group in groups.iter().filter(|g| casting.role(g.role_id).is_none()) {
            warn!(casting_id, role_id = group.role_id, "applications for a removed role");
            reviews.push(RoleReview {
                role_id: group.role_id.to_string(),
                role_name: None,
                applications: group.applications.iter().map(|a| (*a).clone()).collect(),
            });
        }
        Ok(reviews)
    }

    /// Everything one talent has submitted, newest first. Emails compare case-insensitively.
    pub async fn applications_by_applicant(
        &self,
        email: &str,
    ) -> Result<Vec<Application>, DomainError> {
        let email = email.trim();
        let mut mine: Vec<Application> = self
            .repo
            .list_applications()
            .await?
            .into_iter()
            .filter(|a| a.applicant_email.trim().eq_ignore_ascii_case(email))
            .collect();
        mine.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(mine)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError> {
        let castings = self.repo.list_castings().await?;
        Ok(DashboardStats::from_castings(&castings))
    }
}

fn check_publishable(title: &str, production: &str, casting_type: &str) -> Result<(), DomainError> {
    validate_required(title, "title")?;
    validate_required(production, "production")?;
    validate_required(casting_type, "type")
}

/// Trim list entries, derive category, assign missing role ids, force status.
fn normalize(mut casting: NewCasting, status: CastingStatus) -> Result<NewCasting, DomainError> {
    casting.status = status;
    casting.requirements = tidy(casting.requirements);
    casting.shooting_locations = tidy(casting.shooting_locations);
    casting.required_documents = tidy(casting.required_documents);
    casting.languages = tidy(casting.languages);
    casting.special_skills = tidy(casting.special_skills);
    if casting.category.trim().is_empty() && !casting.casting_type.trim().is_empty() {
        casting.category = category_for_type(&casting.casting_type);
    }
    for (i, role) in casting.roles.iter_mut().enumerate() {
        if role.id.trim().is_empty() {
            role.id = format!("role-{}", i + 1);
        }
    }
    check_roles(&casting.roles)?;
    Ok(casting)
}

fn check_roles(roles: &[Role]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for role in roles {
        validate_required(&role.name, "role name")?;
        if !seen.insert(role.id.as_str()) {
            return Err(DomainError::Validation(format!(
                "duplicate role id: {}",
                role.id
            )));
        }
        match (role.age_min, role.age_max) {
            (Some(min), Some(max)) if min > max => {
                return Err(DomainError::Validation(format!(
                    "role {}: minimum age {} above maximum {}",
                    role.name, min, max
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

fn tidy(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryRepo;

    fn service() -> CastingService {
        CastingService::new(Arc::new(MemoryRepo::seeded()))
    }

    fn role(id: &str, name: &str) -> Role {
        Role {
            id: id.to_string(),
            name: name.to_string(),
            talents_needed: 1,
            ..Role::default()
        }
    }

    fn complete() -> NewCasting {
        NewCasting {
            title: "Short film - Djerba".to_string(),
            production: "Island Pictures".to_string(),
            casting_type: "Cinéma".to_string(),
            location: "Djerba".to_string(),
            requirements: vec!["  Swimmer ".to_string(), "".to_string(), " ".to_string()],
            roles: vec![role("", "Fisherman"), role("", "Daughter")],
            ..NewCasting::default()
        }
    }

    fn application(casting_id: CastingId, role_id: &str) -> NewApplication {
        NewApplication {
            casting_id,
            role_id: role_id.to_string(),
            applicant_name: "Amira Ben Salah".to_string(),
            applicant_email: "talent@demo.tn".to_string(),
            cover_message: "I grew up in Carthage.".to_string(),
            ..NewApplication::default()
        }
    }

    #[tokio::test]
    async fn test_publish_normalizes() {
        let s = service();
        let c = s.publish_casting(complete()).await.unwrap();
        assert_eq!(c.id, 5);
        assert_eq!(c.status, CastingStatus::Active);
        assert_eq!(c.category, "film");
        assert_eq!(c.requirements, vec!["Swimmer".to_string()]);
        let ids: Vec<_> = c.roles.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["role-1", "role-2"]);
    }

    #[tokio::test]
    async fn test_publish_requires_fields() {
        let s = service();
        for broken in [
            NewCasting {
                title: " ".to_string(),
                ..complete()
            },
            NewCasting {
                production: String::new(),
                ..complete()
            },
            NewCasting {
                casting_type: String::new(),
                ..complete()
            },
        ] {
            assert!(matches!(
                s.publish_casting(broken).await,
                Err(DomainError::Validation(_))
            ));
        }
        assert_eq!(s.list_castings().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_publish_rejects_bad_roles() {
        let s = service();
        let dup = NewCasting {
            roles: vec![role("r", "A"), role("r", "B")],
            ..complete()
        };
        assert!(s.publish_casting(dup).await.is_err());

        let ages = NewCasting {
            roles: vec![Role {
                age_min: Some(40),
                age_max: Some(20),
                ..role("r", "A")
            }],
            ..complete()
        };
        assert!(s.publish_casting(ages).await.is_err());
    }

    #[tokio::test]
    async fn test_draft_needs_only_title() {
        let s = service();
        let draft = s
            .save_draft(NewCasting {
                title: "Untitled series".to_string(),
                ..NewCasting::default()
            })
            .await
            .unwrap();
        assert_eq!(draft.status, CastingStatus::Draft);
        assert!(s.save_draft(NewCasting::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_status_patch_cannot_activate_draft() {
        let s = service();
        let draft = s
            .save_draft(NewCasting {
                title: "Only a title".to_string(),
                ..NewCasting::default()
            })
            .await
            .unwrap();

        assert!(matches!(
            s.update_casting(draft.id, CastingPatch::status(CastingStatus::Active))
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            s.publish_draft(draft.id).await,
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            s.get_casting(draft.id).await.unwrap().status,
            CastingStatus::Draft
        );
    }

    #[tokio::test]
    async fn test_publish_draft_derives_category() {
        let s = service();
        let draft = s
            .save_draft(NewCasting {
                title: "Ramadan sitcom".to_string(),
                ..NewCasting::default()
            })
            .await
            .unwrap();
        s.update_casting(
            draft.id,
            CastingPatch {
                production: Some("Cactus Prod".to_string()),
                casting_type: Some("Série TV".to_string()),
                ..CastingPatch::default()
            },
        )
        .await
        .unwrap();

        let published = s.publish_draft(draft.id).await.unwrap();
        assert_eq!(published.status, CastingStatus::Active);
        assert_eq!(published.category, "tv");
        assert!(matches!(
            s.publish_draft(99).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_reopen_closed_casting() {
        let s = service();
        s.close_casting(4).await.unwrap();
        assert!(
            s.update_casting(4, CastingPatch::status(CastingStatus::Active))
                .await
                .is_err()
        );
        let reopened = s.publish_draft(4).await.unwrap();
        assert_eq!(reopened.status, CastingStatus::Active);
        assert_eq!(reopened.category, "commercial");
    }

    #[tokio::test]
    async fn test_applications_by_applicant() {
        let s = service();
        let first = s
            .submit_application(application(1, "role-1-1"))
            .await
            .unwrap();
        let other = NewApplication {
            applicant_email: "someone@else.tn".to_string(),
            ..application(2, "role-2-1")
        };
        s.submit_application(other).await.unwrap();
        let second = s
            .submit_application(application(3, "role-3-1"))
            .await
            .unwrap();

        let mine = s
            .applications_by_applicant(" TALENT@demo.tn ")
            .await
            .unwrap();
        let ids: Vec<_> = mine.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(mine.len(), 2);
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
        assert!(mine[0].submitted_at >= mine[1].submitted_at);
        assert!(
            s.applications_by_applicant("nobody@demo.tn")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_are_not_found() {
        let s = service();
        assert!(matches!(
            s.update_casting(99, CastingPatch::status(CastingStatus::Closed))
                .await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            s.delete_casting(99).await,
            Err(DomainError::NotFound { .. })
        ));

        s.delete_casting(2).await.unwrap();
        assert!(matches!(
            s.delete_casting(2).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_close_casting() {
        let s = service();
        let closed = s.close_casting(1).await.unwrap();
        assert_eq!(closed.status, CastingStatus::Closed);
        assert_eq!(closed.title, "Lead Role - Historical Drama Series");
    }

    #[tokio::test]
    async fn test_view_counts() {
        let s = service();
        let before = s.get_casting(3).await.unwrap().views;
        let viewed = s.view_casting(3).await.unwrap();
        assert_eq!(viewed.views, before + 1);
        assert!(s.view_casting(77).await.is_err());
    }

    #[tokio::test]
    async fn test_search() {
        let s = service();
        let tunis = s.search(&CastingFilter::search("tunis")).await.unwrap();
        let ids: Vec<_> = tunis.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let theater = s
            .search(&CastingFilter::search("tunis").with_category("theater"))
            .await
            .unwrap();
        assert_eq!(theater.len(), 1);
        assert_eq!(theater[0].id, 3);
    }

    #[tokio::test]
    async fn test_submit_application_checks_references() {
        let s = service();
        assert!(matches!(
            s.submit_application(application(99, "role-1-1")).await,
            Err(DomainError::NotFound { entity: "casting", .. })
        ));
        assert!(matches!(
            s.submit_application(application(1, "role-9-9")).await,
            Err(DomainError::NotFound { entity: "role", .. })
        ));
        let blank = NewApplication {
            cover_message: "  ".to_string(),
            ..application(1, "role-1-1")
        };
        assert!(matches!(
            s.submit_application(blank).await,
            Err(DomainError::Validation(_))
        ));
        assert!(s.applications_for_casting(1).await.unwrap().is_empty());
        assert_eq!(s.get_casting(1).await.unwrap().applications, 45);
    }

    #[tokio::test]
    async fn test_submit_application_rejects_closed_casting() {
        let s = service();
        s.close_casting(2).await.unwrap();
        assert!(matches!(
            s.submit_application(application(2, "role-2-1")).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_application_counts() {
        let s = service();
        let app = s
            .submit_application(application(1, "role-1-1"))
            .await
            .unwrap();
        assert_eq!(app.casting_id, 1);
        assert_eq!(s.get_casting(1).await.unwrap().applications, 46);
        assert_eq!(s.get_casting(2).await.unwrap().applications, 32);
        assert_eq!(s.applications_for_role(1, "role-1-1").await.unwrap(), vec![app]);
    }

    #[tokio::test]
    async fn test_review_by_role_lists_every_role() {
        let s = service();
        s.submit_application(application(1, "role-1-2")).await.unwrap();
        s.submit_application(application(1, "role-1-2")).await.unwrap();

        let review = s.review_by_role(1).await.unwrap();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].role_id, "role-1-1");
        assert!(review[0].applications.is_empty());
        assert_eq!(review[1].role_name.as_deref(), Some("Senate Advisor"));
        assert_eq!(review[1].applications.len(), 2);
    }

    #[tokio::test]
    async fn test_review_by_role_keeps_removed_roles() {
        let s = service();
        s.submit_application(application(2, "role-2-1")).await.unwrap();
        s.update_casting(
            2,
            CastingPatch {
                roles: Some(vec![role("role-2-9", "Neighbour")]),
                ..CastingPatch::default()
            },
        )
        .await
        .unwrap();

        let review = s.review_by_role(2).await.unwrap();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].role_id, "role-2-9");
        assert_eq!(review[1].role_id, "role-2-1");
        assert_eq!(review[1].role_name, None);
        assert_eq!(review[1].applications.len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let s = service();
        let stats = s.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_castings, 4);
        assert_eq!(stats.active_castings, 4);
        assert_eq!(stats.total_applications, 45 + 32 + 28 + 67);
        assert_eq!(stats.total_views, 320 + 180 + 95 + 245);
    }
}
