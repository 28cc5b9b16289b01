//! File system utils.

use std::path::Path;

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

pub struct FsHandler;

impl FsHandler {
    /// Create a directory (and its parents) if it doesn't exist.
    pub async fn ensure_directory(path: &Path) -> anyhow::Result<()> {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(());
        }

        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        tracing::debug!("Created directory: {}", path.display());

        Ok(())
    }

    /// Read and parse a JSON file. Returns `None` if the file does not exist.
    pub async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
        if !tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?
        {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

        Ok(Some(value))
    }

    /// Write `value` as pretty-printed JSON.
    ///
    /// The content goes to a sibling temporary file first and is renamed over
    /// `path`, so readers never observe a half-written file.
    pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_directory(parent).await?;
        }

        let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to move {} into place", path.display()))?;

        Ok(())
    }
}
