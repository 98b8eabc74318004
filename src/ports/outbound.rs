//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Application, Casting, CastingId, CastingPatch, DomainError, NewApplication, NewCasting,
};

/// Casting registry. Single source of truth for castings and their applications.
///
/// Absence is never an error at this level: updates and deletes on unknown ids return
/// `false`, lookups return `None` or an empty list. Callers wanting a hard failure go
/// through `CastingService`.
#[async_trait::async_trait]
pub trait CastingRepoPort: Send + Sync {
    /// Store a new casting. The id is strictly greater than any id this store has handed out.
    async fn add_casting(&self, casting: NewCasting) -> Result<Casting, DomainError>;

    /// Merge the provided fields into the casting. Returns `false` if the id is unknown.
    async fn update_casting(&self, id: CastingId, patch: CastingPatch)
    -> Result<bool, DomainError>;

    /// Returns `false` if the id is unknown.
    async fn delete_casting(&self, id: CastingId) -> Result<bool, DomainError>;

    async fn get_casting(&self, id: CastingId) -> Result<Option<Casting>, DomainError>;

    /// All castings in insertion order.
    async fn list_castings(&self) -> Result<Vec<Casting>, DomainError>;

    /// Bump the view counter. Returns `false` if the id is unknown.
    async fn record_view(&self, id: CastingId) -> Result<bool, DomainError>;

    /// Store an application and bump the parent casting's counter in one step.
    /// The counter is left alone when the casting does not exist.
    async fn add_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, DomainError>;

    /// Applications for one casting, in submission order.
    async fn applications_for_casting(
        &self,
        casting_id: CastingId,
    ) -> Result<Vec<Application>, DomainError>;

    /// Applications for one role of one casting, in submission order.
    async fn applications_for_role(
        &self,
        casting_id: CastingId,
        role_id: &str,
    ) -> Result<Vec<Application>, DomainError>;

    async fn list_applications(&self) -> Result<Vec<Application>, DomainError>;
}

/// Export sink for producer review data.
#[async_trait::async_trait]
pub trait ExportPort: Send + Sync {
    /// Write applications as CSV. Returns the written path.
    async fn export_applications(
        &self,
        name: &str,
        applications: &[Application],
    ) -> Result<std::path::PathBuf, DomainError>;

    /// Write a JSON snapshot of castings. Returns the written path.
    async fn export_castings(
        &self,
        name: &str,
        castings: &[Casting],
    ) -> Result<std::path::PathBuf, DomainError>;
}
