//! Persistence adapters. The registry lives in memory; seed data restores it on startup.

pub mod memory_repo;
pub mod seed;

pub use memory_repo::MemoryRepo;
