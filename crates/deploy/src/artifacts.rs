//! Hardhat artifact loading.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use alloy_core::primitives::Bytes;
use anyhow::Context;
use serde::Deserialize;

use crate::contract::Artifact;

/// Subset of a Hardhat artifact file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    abi: serde_json::Value,
    bytecode: Bytes,
}

/// Compiled contracts indexed by contract name.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    artifacts: HashMap<String, Artifact>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every artifact below `dir` (typically Hardhat's `artifacts/`).
    ///
    /// Debug files (`*.dbg.json`) and JSON files that are not contract
    /// artifacts (build info, caches) are skipped.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut store = Self::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let entries = std::fs::read_dir(&current)
                .with_context(|| format!("Failed to read artifacts directory {}", current.display()))?;

            for entry in entries {
                let path = entry
                    .with_context(|| format!("Failed to list {}", current.display()))?
                    .path();

                if path.is_dir() {
                    pending.push(path);
                } else if is_artifact_file(&path) {
                    store.load_file(&path)?;
                }
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            artifacts = store.len(),
            "Loaded contract artifacts"
        );

        Ok(store)
    }

    fn load_file(&mut self, path: &PathBuf) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;

        match serde_json::from_str::<HardhatArtifact>(&content) {
            Ok(artifact) => {
                self.insert(
                    artifact.contract_name,
                    Artifact {
                        abi: artifact.abi,
                        bytecode: artifact.bytecode,
                    },
                );
            }
            Err(err) => {
                tracing::trace!(path = %path.display(), %err, "Skipping non-artifact JSON file");
            }
        }

        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, artifact: Artifact) {
        self.artifacts.insert(name.into(), artifact);
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.get(name)
    }

    pub fn require(&self, name: &str) -> anyhow::Result<&Artifact> {
        self.get(name)
            .with_context(|| format!("No artifact found for contract {name}"))
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

fn is_artifact_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    file_name.ends_with(".json") && !file_name.ends_with(".dbg.json")
}
