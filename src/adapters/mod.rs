//! Infrastructure adapters. Implement outbound ports and drive inbound ones.
//!
//! In-memory registry, filesystem export, terminal UI. Map errors to DomainError.

pub mod export;
pub mod persistence;
pub mod ui;
