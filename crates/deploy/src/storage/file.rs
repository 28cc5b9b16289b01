//! JSON file storage adapter.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{fs::FsHandler, record::DeploymentRecord, traits::StorageAdapter};

/// Stores each record as `<dir>/<ComponentName>.json`.
#[derive(Debug, Clone)]
pub struct FileStorageAdapter {
    dir: PathBuf,
}

impl FileStorageAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            anyhow::bail!("Invalid component name for file storage: {name:?}");
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl StorageAdapter for FileStorageAdapter {
    async fn get_record(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        let path = self.record_path(name)?;
        let record = FsHandler::read_json(&path).await?;
        tracing::trace!(name, path = %path.display(), found = record.is_some(), "Read deployment record");
        Ok(record)
    }

    async fn put_record(&self, name: &str, record: DeploymentRecord) -> Result<()> {
        let path = self.record_path(name)?;
        FsHandler::write_json(&path, &record).await?;
        tracing::debug!(name, path = %path.display(), "Deployment record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_core::primitives::{Address, Bytes};
    use tempdir::TempDir;

    use super::*;

    fn record() -> DeploymentRecord {
        DeploymentRecord {
            name: "ZNSTreasury".to_string(),
            address: Address::repeat_byte(0x42),
            abi: r#"[{"type":"constructor"}]"#.to_string(),
            bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
            implementation: Some(Address::repeat_byte(0x43)),
            version: "0.1.0".to_string(),
        }
    }

    #[tokio::test]
    async fn save_and_load_record() {
        let temp_dir = TempDir::new("zns-storage").expect("Failed to create temp dir");
        let storage = FileStorageAdapter::new(temp_dir.path().join("deployments"));

        storage.put_record("ZNSTreasury", record()).await.unwrap();

        assert!(temp_dir.path().join("deployments/ZNSTreasury.json").exists());
        let loaded = storage.get_record("ZNSTreasury").await.unwrap();
        assert_eq!(loaded, Some(record()));
    }

    #[tokio::test]
    async fn missing_record_is_absent() {
        let temp_dir = TempDir::new("zns-storage").expect("Failed to create temp dir");
        let storage = FileStorageAdapter::new(temp_dir.path());

        assert!(storage.get_record("ZNSRegistry").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupted_record_is_an_error() {
        let temp_dir = TempDir::new("zns-storage").expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("ZNSRegistry.json"), "{ invalid json }")
            .expect("Failed to write corrupted file");
        let storage = FileStorageAdapter::new(temp_dir.path());

        assert!(storage.get_record("ZNSRegistry").await.is_err());
    }

    #[tokio::test]
    async fn path_like_names_are_rejected() {
        let temp_dir = TempDir::new("zns-storage").expect("Failed to create temp dir");
        let storage = FileStorageAdapter::new(temp_dir.path());

        assert!(storage.get_record("../escape").await.is_err());
        assert!(storage.put_record("a/b", record()).await.is_err());
    }
}
