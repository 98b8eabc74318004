//! Implements ExportPort on the local filesystem.
//!
//! One file per export under the configured directory. Writes go through a temp file
//! that is synced and renamed over the target, so a crash never leaves half a file.

use crate::adapters::export::csv_export::applications_to_csv;
use crate::domain::{Application, Casting, DomainError};
use crate::ports::ExportPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub struct FsExporter {
    base_dir: PathBuf,
}

impl FsExporter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Only `[A-Za-z0-9_-]` survive in file names; anything else becomes `_`.
    fn file_path(&self, name: &str, extension: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { "export".to_string() } else { stem };
        self.base_dir.join(format!("{}.{}", stem, extension))
    }

    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create export dir: {}", e)))?;

        let temp_path = path.with_extension("tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
        f.write_all(contents)
            .await
            .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, path)
            .await
            .map_err(|e| DomainError::Export(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ExportPort for FsExporter {
    async fn export_applications(
        &self,
        name: &str,
        applications: &[Application],
    ) -> Result<PathBuf, DomainError> {
        let csv = applications_to_csv(applications)
            .map_err(|e| DomainError::Export(format!("render CSV: {}", e)))?;
        let path = self.file_path(name, "csv");
        self.write_atomic(&path, csv.as_bytes()).await?;
        info!(path = %path.display(), count = applications.len(), "applications exported");
        Ok(path)
    }

    async fn export_castings(
        &self,
        name: &str,
        castings: &[Casting],
    ) -> Result<PathBuf, DomainError> {
        let json = serde_json::to_string_pretty(castings)
            .map_err(|e| DomainError::Export(format!("render JSON: {}", e)))?;
        let path = self.file_path(name, "json");
        self.write_atomic(&path, json.as_bytes()).await?;
        info!(path = %path.display(), count = castings.len(), "castings exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::seed;

    #[tokio::test]
    async fn test_export_castings_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FsExporter::new(dir.path().join("exports"));
        let castings = seed::castings();

        let path = exporter.export_castings("castings", &castings).await.unwrap();
        assert_eq!(path, dir.path().join("exports").join("castings.json"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: Vec<Casting> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, castings);
        assert!(raw.contains("\"type\": \"TV Series\""));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_export_applications_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FsExporter::new(dir.path());

        let path = exporter
            .export_applications("casting 1/../role", &[])
            .await
            .unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("casting_1____role.csv")
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("Id;Casting;Role"));
    }
}
