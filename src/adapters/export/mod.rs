//! Export adapters. Producer review data written to disk.

pub mod csv_export;
pub mod fs_exporter;

pub use csv_export::applications_to_csv;
pub use fs_exporter::FsExporter;
