//! Mission capability set.

use std::fmt;

use crate::{
    contract::{ContractCall, DeployArg, ProxyData},
    error::CampaignError,
};

use super::context::MissionContext;

/// One unit of deployment work: a single logical contract.
///
/// Concrete missions provide identity, proxy configuration and argument
/// computation. The idempotency check, record write and registry update are
/// driven by the campaign and are not part of this trait.
pub trait Mission: Send + Sync {
    /// Artifact name, also the storage key.
    fn contract_name(&self) -> &str;

    /// Registry key. Usually the same as the contract name.
    fn instance_name(&self) -> &str {
        self.contract_name()
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::direct()
    }

    /// Instance names this mission reads from the contract state.
    fn dependencies(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Constructor (or initializer, for proxies) arguments.
    fn deploy_args(&self, _ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(Vec::new())
    }

    /// Runs right before a deployment. Must not deploy anything itself.
    fn pre_deploy(&mut self, _ctx: &MissionContext<'_>) -> Result<(), CampaignError> {
        Ok(())
    }

    /// Whether [`Self::post_deploy`] has to run. Evaluated even when the
    /// deployment itself was skipped.
    fn needs_post_deploy(&self, _ctx: &MissionContext<'_>) -> bool {
        false
    }

    /// Setup transactions to send once the contract is registered.
    fn post_deploy(&self, _ctx: &MissionContext<'_>) -> Result<Vec<ContractCall>, CampaignError> {
        Ok(Vec::new())
    }
}

/// Recipe for a mission. The campaign builds a fresh mission from it on every run.
pub trait MissionFactory: fmt::Debug + Send + Sync {
    /// Contract name of the mission this factory builds.
    fn contract_name(&self) -> &str;

    /// Build the mission. Configuration problems are reported here, before
    /// any lifecycle step runs.
    fn build(&self, ctx: &MissionContext<'_>) -> Result<Box<dyn Mission>, CampaignError>;
}

/// Entry of a campaign's mission list.
pub type MissionDescriptor = Box<dyn MissionFactory>;
