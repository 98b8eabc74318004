//! Core domain layer. No external I/O dependencies.
//!
//! Entities, read-side helpers and field rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod queries;
pub mod validation;

pub use entities::{
    Application, Casting, CastingId, CastingPatch, CastingStatus, DemoUser, NewApplication,
    NewCasting, Role, User, UserRole,
};
pub use errors::DomainError;
pub use queries::{CastingFilter, CategoryFilter, DashboardStats, RoleApplications};
