//! Application use cases. Orchestrate domain logic via ports.

pub mod access;
pub mod casting_service;
pub mod session_service;

pub use access::{AccessDecision, Action};
pub use casting_service::{CastingService, RoleReview};
pub use session_service::{ProfileUpdate, SessionService};
