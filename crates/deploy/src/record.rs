//! Persisted description of a completed deployment.

use alloy_core::primitives::{Address, Bytes};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::contract::{Artifact, ContractHandle};

/// Version tag written into every record produced by this crate.
pub const RECORD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the storage adapter keeps for one component.
///
/// A record is written once per successful deployment and never patched: a
/// redeploy produces a new record that replaces the old one under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Component name, also the storage key.
    pub name: String,
    pub address: Address,
    /// JSON-serialized ABI.
    pub abi: String,
    pub bytecode: Bytes,
    /// Logic contract address. Only set for proxy deployments.
    pub implementation: Option<Address>,
    /// Campaign version that produced this record.
    pub version: String,
}

impl DeploymentRecord {
    pub fn new(
        name: impl Into<String>,
        handle: &ContractHandle,
        artifact: &Artifact,
        implementation: Option<Address>,
        version: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let abi = serde_json::to_string(&artifact.abi).context("Failed to serialize contract ABI")?;

        Ok(Self {
            name: name.into(),
            address: handle.address,
            abi,
            bytecode: artifact.bytecode.clone(),
            implementation,
            version: version.into(),
        })
    }
}
