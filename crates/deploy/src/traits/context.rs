//! Read-only view handed to missions.

use alloy_core::primitives::Address;

use crate::{config::CampaignConfig, error::CampaignError, state::ContractState};

/// What a mission may look at while it is built and run.
///
/// The state only contains contracts registered by missions that ran before
/// the current one.
#[derive(Debug, Clone, Copy)]
pub struct MissionContext<'a> {
    pub config: &'a CampaignConfig,
    pub state: &'a ContractState,
    /// Contract names of every mission in the campaign, in declared order.
    pub missions: &'a [String],
}

impl<'a> MissionContext<'a> {
    pub fn new(config: &'a CampaignConfig, state: &'a ContractState, missions: &'a [String]) -> Self {
        Self {
            config,
            state,
            missions,
        }
    }

    /// Whether a mission deploying `contract_name` is part of the campaign.
    pub fn has_mission(&self, contract_name: &str) -> bool {
        self.missions.iter().any(|name| name == contract_name)
    }

    /// Address of an already registered instance.
    pub fn address(&self, instance: &str) -> Result<Address, CampaignError> {
        self.state.address(instance)
    }
}
