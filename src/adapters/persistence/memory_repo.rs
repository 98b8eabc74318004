//! Implements CastingRepoPort in process memory.
//!
//! Castings and applications share one lock so an application insert and its counter
//! bump are observed together. State is lost on exit; startup reloads the seed.

use crate::adapters::persistence::seed;
use crate::domain::{
    Application, Casting, CastingId, CastingPatch, DomainError, NewApplication, NewCasting,
};
use crate::ports::CastingRepoPort;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct StoreData {
    castings: Vec<Casting>,
    applications: Vec<Application>,
    /// Highest casting id ever handed out or loaded. Never decreases, so deleted ids are not reused.
    last_casting_id: CastingId,
    /// Disambiguates application ids generated within the same millisecond.
    application_seq: u64,
}

/// In-memory casting registry.
pub struct MemoryRepo {
    data: RwLock<StoreData>,
}

impl MemoryRepo {
    /// Empty store. First casting gets id 1.
    pub fn new() -> Self {
        Self::with_castings(Vec::new())
    }

    /// Store preloaded with the given castings (ids kept as is).
    pub fn with_castings(castings: Vec<Casting>) -> Self {
        let last_casting_id = castings.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            data: RwLock::new(StoreData {
                castings,
                last_casting_id,
                ..StoreData::default()
            }),
        }
    }

    /// Store preloaded with the fixed marketplace seed.
    pub fn seeded() -> Self {
        Self::with_castings(seed::castings())
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CastingRepoPort for MemoryRepo {
    async fn add_casting(&self, casting: NewCasting) -> Result<Casting, DomainError> {
        let mut data = self.data.write().await;
        let max_existing = data.castings.iter().map(|c| c.id).max().unwrap_or(0);
        let id = data
            .last_casting_id
            .max(max_existing)
            .checked_add(1)
            .ok_or_else(|| DomainError::Repo("casting id space exhausted".into()))?;
        data.last_casting_id = id;

        let stored = casting.into_casting(id, Utc::now().date_naive());
        data.castings.push(stored.clone());
        debug!(casting_id = id, title = %stored.title, "casting added");
        Ok(stored)
    }

    async fn update_casting(
        &self,
        id: CastingId,
        patch: CastingPatch,
    ) -> Result<bool, DomainError> {
        let mut data = self.data.write().await;
        match data.castings.iter_mut().find(|c| c.id == id) {
            Some(casting) => {
                patch.apply_to(casting);
                debug!(casting_id = id, "casting updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_casting(&self, id: CastingId) -> Result<bool, DomainError> {
        let mut data = self.data.write().await;
        let before = data.castings.len();
        data.castings.retain(|c| c.id != id);
        let removed = data.castings.len() < before;
        if removed {
            debug!(casting_id = id, "casting deleted");
        }
        Ok(removed)
    }

    async fn get_casting(&self, id: CastingId) -> Result<Option<Casting>, DomainError> {
        let data = self.data.read().await;
        Ok(data.castings.iter().find(|c| c.id == id).cloned())
    }

    async fn list_castings(&self) -> Result<Vec<Casting>, DomainError> {
        Ok(self.data.read().await.castings.clone())
    }

    async fn record_view(&self, id: CastingId) -> Result<bool, DomainError> {
        let mut data = self.data.write().await;
        match data.castings.iter_mut().find(|c| c.id == id) {
            Some(casting) => {
                casting.views = casting.views.saturating_add(1);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, DomainError> {
        let mut data = self.data.write().await;
        data.application_seq += 1;
        let submitted_at = Utc::now();
        let id = format!(
            "app-{}-{}",
            submitted_at.timestamp_millis(),
            data.application_seq
        );

        let stored = application.into_application(id, submitted_at);
        let casting_id = stored.casting_id;
        data.applications.push(stored.clone());

        match data.castings.iter_mut().find(|c| c.id == casting_id) {
            Some(casting) => casting.applications = casting.applications.saturating_add(1),
            None => debug!(casting_id, "application for unknown casting; counter untouched"),
        }
        debug!(application_id = %stored.id, casting_id, role_id = %stored.role_id, "application added");
        Ok(stored)
    }

    async fn applications_for_casting(
        &self,
        casting_id: CastingId,
    ) -> Result<Vec<Application>, DomainError> {
        let data = self.data.read().await;
        Ok(data
            .applications
            .iter()
            .filter(|a| a.casting_id == casting_id)
            .cloned()
            .collect())
    }

    async fn applications_for_role(
        &self,
        casting_id: CastingId,
        role_id: &str,
    ) -> Result<Vec<Application>, DomainError> {
        let data = self.data.read().await;
        Ok(data
            .applications
            .iter()
            .filter(|a| a.casting_id == casting_id && a.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn list_applications(&self) -> Result<Vec<Application>, DomainError> {
        Ok(self.data.read().await.applications.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CastingStatus;
    use std::collections::HashSet;

    fn titled(title: &str) -> NewCasting {
        NewCasting {
            title: title.to_string(),
            ..NewCasting::default()
        }
    }

    fn application(casting_id: CastingId, role_id: &str) -> NewApplication {
        NewApplication {
            casting_id,
            role_id: role_id.to_string(),
            applicant_name: "Amira Ben Salah".to_string(),
            applicant_email: "talent@demo.tn".to_string(),
            cover_message: "Available immediately".to_string(),
            ..NewApplication::default()
        }
    }

    async fn two_castings() -> MemoryRepo {
        let repo = MemoryRepo::new();
        repo.add_casting(titled("one")).await.unwrap();
        repo.add_casting(titled("two")).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_first_id_is_one() {
        let repo = MemoryRepo::new();
        let c = repo.add_casting(titled("first")).await.unwrap();
        assert_eq!(c.id, 1);
        assert_eq!(c.applications, 0);
        assert_eq!(c.views, 0);
    }

    #[tokio::test]
    async fn test_ids_increase_across_deletions() {
        let repo = MemoryRepo::new();
        let a = repo.add_casting(titled("a")).await.unwrap();
        let b = repo.add_casting(titled("b")).await.unwrap();
        assert!(repo.delete_casting(a.id).await.unwrap());
        let c = repo.add_casting(titled("c")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        // Deleting the newest one must not free its id either.
        assert!(repo.delete_casting(c.id).await.unwrap());
        let d = repo.add_casting(titled("d")).await.unwrap();
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn test_seeded_ids_scenario() {
        let repo = two_castings().await;
        let t = repo.add_casting(titled("T")).await.unwrap();
        assert_eq!(t.id, 3);
        assert!(repo.delete_casting(2).await.unwrap());
        let u = repo.add_casting(titled("U")).await.unwrap();
        assert_eq!(u.id, 4);

        let ids: HashSet<_> = repo
            .list_castings()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, HashSet::from([1, 3, 4]));
    }

    #[tokio::test]
    async fn test_with_castings_continues_after_max_seed_id() {
        let repo = MemoryRepo::seeded();
        let max = repo
            .list_castings()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap();
        let c = repo.add_casting(titled("new")).await.unwrap();
        assert_eq!(c.id, max + 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_the_given_field() {
        let repo = two_castings().await;
        let before = repo.list_castings().await.unwrap();

        let patch = CastingPatch {
            location: Some("Sfax".to_string()),
            ..CastingPatch::default()
        };
        assert!(repo.update_casting(1, patch).await.unwrap());

        let after = repo.list_castings().await.unwrap();
        let mut expected = before[0].clone();
        expected.location = "Sfax".to_string();
        assert_eq!(after[0], expected);
        assert_eq!(after[1], before[1]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let repo = two_castings().await;
        let before = repo.list_castings().await.unwrap();
        let changed = repo
            .update_casting(99, CastingPatch::status(CastingStatus::Closed))
            .await
            .unwrap();
        assert!(!changed);
        assert_eq!(repo.list_castings().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_then_update_is_noop() {
        let repo = two_castings().await;
        assert!(repo.delete_casting(1).await.unwrap());
        let before = repo.list_castings().await.unwrap();

        assert!(!repo.delete_casting(1).await.unwrap());
        let changed = repo
            .update_casting(1, CastingPatch::status(CastingStatus::Draft))
            .await
            .unwrap();
        assert!(!changed);
        assert_eq!(repo.list_castings().await.unwrap(), before);
        assert!(repo.get_casting(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_application_bumps_only_its_casting() {
        let repo = two_castings().await;
        let app = repo.add_application(application(1, "r1")).await.unwrap();
        assert!(app.id.starts_with("app-"));

        let castings = repo.list_castings().await.unwrap();
        assert_eq!(castings[0].applications, 1);
        assert_eq!(castings[1].applications, 0);
    }

    #[tokio::test]
    async fn test_application_for_missing_casting_is_still_stored() {
        let repo = two_castings().await;
        repo.add_application(application(42, "r1")).await.unwrap();

        assert_eq!(repo.applications_for_casting(42).await.unwrap().len(), 1);
        for c in repo.list_castings().await.unwrap() {
            assert_eq!(c.applications, 0);
        }
    }

    #[tokio::test]
    async fn test_two_applications_same_role_in_order() {
        let repo = two_castings().await;
        let before = repo.get_casting(1).await.unwrap().unwrap().applications;

        let first = repo.add_application(application(1, "r1")).await.unwrap();
        let second = repo.add_application(application(1, "r1")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(first.submitted_at <= second.submitted_at);

        let for_role = repo.applications_for_role(1, "r1").await.unwrap();
        assert_eq!(for_role, vec![first, second]);
        let after = repo.get_casting(1).await.unwrap().unwrap().applications;
        assert_eq!(after, before + 2);
    }

    #[tokio::test]
    async fn test_role_queries_partition_casting_applications() {
        let repo = two_castings().await;
        for (casting, role) in [(1, "r1"), (1, "r2"), (2, "r1"), (1, "r1"), (1, "r3")] {
            repo.add_application(application(casting, role)).await.unwrap();
        }

        let all = repo.applications_for_casting(1).await.unwrap();
        assert_eq!(all.len(), 4);

        let mut union = Vec::new();
        for role in ["r1", "r2", "r3"] {
            let subset = repo.applications_for_role(1, role).await.unwrap();
            assert!(subset.iter().all(|a| all.contains(a)));
            union.extend(subset);
        }
        union.sort_by(|a, b| a.id.cmp(&b.id));
        let mut expected = all.clone();
        expected.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(union, expected);
    }

    #[tokio::test]
    async fn test_record_view() {
        let repo = two_castings().await;
        assert!(repo.record_view(2).await.unwrap());
        assert!(repo.record_view(2).await.unwrap());
        assert!(!repo.record_view(9).await.unwrap());
        assert_eq!(repo.get_casting(2).await.unwrap().unwrap().views, 2);
    }
}
