//! tn-casting: casting-call marketplace for Tunisian productions, hexagonal layout.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
