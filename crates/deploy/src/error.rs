//! Error taxonomy for campaign orchestration.

use alloy_core::primitives::Address;
use thiserror::Error;

/// Every condition that aborts a campaign.
///
/// Collaborators (deployers, storage adapters) report failures as
/// [`anyhow::Error`]; the lifecycle wraps them exactly once, at the step where
/// they surfaced, so the caller can tell a configuration problem apart from a
/// failed transaction or a failed store write.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// A required setting is missing or inconsistent. Raised before any deploy call.
    #[error("Invalid campaign configuration: {0}")]
    Config(String),

    /// Two mission descriptors claim the same component.
    #[error("Mission for {contract} is declared more than once")]
    DuplicateMission { contract: String },

    /// A mission reads an instance that no earlier mission produces.
    #[error("Mission {mission} depends on `{dependency}`, which no earlier mission deploys")]
    ForwardReference { mission: String, dependency: String },

    /// A registry lookup for an instance that has not been registered yet.
    #[error("Contract `{instance}` is not registered in the campaign state")]
    MissingContract { instance: String },

    /// A handle handed to the registry does not describe a usable contract.
    #[error("Refusing to register `{instance}`: {reason}")]
    MalformedHandle { instance: String, reason: String },

    /// Creating (or reconstructing) a contract failed.
    #[error("Deployment of {contract} failed")]
    Deployment {
        contract: String,
        #[source]
        source: anyhow::Error,
    },

    /// Reading or writing a deployment record failed.
    ///
    /// `address` is set when the contract already exists on-chain but its record
    /// could not be written; the store has to be repaired by hand in that case.
    #[error("Persistence of {contract} failed{}", .address.map(|a| format!(" (deployed at {a}, record missing)")).unwrap_or_default())]
    Persistence {
        contract: String,
        address: Option<Address>,
        #[source]
        source: anyhow::Error,
    },

    /// A post-deploy setup call failed. The primary deployment is already recorded.
    #[error("Post-deploy step of {contract} failed")]
    PostDeploy {
        contract: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CampaignError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error was raised before any on-chain action could have happened.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::DuplicateMission { .. } | Self::ForwardReference { .. }
        )
    }
}
