//! Deploy campaign: runs an ordered list of missions to completion.

mod lifecycle;

use std::collections::HashSet;

use alloy_core::primitives::Address;
use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::{
    config::CampaignConfig,
    contract::ContractHandle,
    error::CampaignError,
    record::RECORD_VERSION,
    state::ContractState,
    traits::{ContractDeployer, MissionContext, MissionDescriptor, StorageAdapter},
};

use lifecycle::MissionRunner;

/// How a single mission resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub contract: String,
    pub instance: String,
    pub address: Address,
    /// `false` when the contract was found in storage.
    pub deployed: bool,
    pub post_deployed: bool,
}

/// Result of [`Campaign::execute`], one outcome per mission in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref)]
pub struct CampaignReport {
    #[deref]
    pub outcomes: Vec<MissionOutcome>,
}

impl CampaignReport {
    pub fn deployed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.deployed).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.deployed).count()
    }

    pub fn outcome(&self, contract: &str) -> Option<&MissionOutcome> {
        self.outcomes.iter().find(|o| o.contract == contract)
    }
}

/// Orchestrates the deployment of a set of interdependent contracts.
///
/// Missions run strictly one after another in declared order; mission `i` can
/// only see what missions `0..i` registered. Every record that reached the
/// storage adapter stays there when a later mission fails, so re-running the
/// campaign resumes where the previous run stopped.
pub struct Campaign<'a, D, S> {
    missions: Vec<MissionDescriptor>,
    mission_names: Vec<String>,
    config: CampaignConfig,
    deployer: &'a D,
    storage: &'a S,
    state: ContractState,
    version: String,
}

impl<'a, D, S> Campaign<'a, D, S>
where
    D: ContractDeployer,
    S: StorageAdapter,
{
    /// Create a campaign after validating the configuration and mission list.
    ///
    /// Every mission is built once up front, so configuration errors,
    /// duplicate missions and forward references are reported before
    /// anything is deployed.
    pub fn new(
        missions: Vec<MissionDescriptor>,
        config: CampaignConfig,
        deployer: &'a D,
        storage: &'a S,
    ) -> Result<Self, CampaignError> {
        config.validate()?;

        let mut seen = HashSet::new();
        let mut mission_names = Vec::with_capacity(missions.len());
        for factory in &missions {
            let contract = factory.contract_name().to_string();
            if !seen.insert(contract.clone()) {
                return Err(CampaignError::DuplicateMission { contract });
            }
            mission_names.push(contract);
        }

        let campaign = Self {
            missions,
            mission_names,
            config,
            deployer,
            storage,
            state: ContractState::new(),
            version: RECORD_VERSION.to_string(),
        };
        campaign.preflight()?;

        Ok(campaign)
    }

    /// Version tag written into deployment records.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    fn preflight(&self) -> Result<(), CampaignError> {
        let empty = ContractState::new();
        let ctx = MissionContext::new(&self.config, &empty, &self.mission_names);
        let mut produced: HashSet<String> = HashSet::new();

        for factory in &self.missions {
            let mission = factory.build(&ctx)?;

            for dependency in mission.dependencies() {
                if !produced.contains(dependency) {
                    return Err(CampaignError::ForwardReference {
                        mission: mission.contract_name().to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
            produced.insert(mission.instance_name().to_string());
        }

        Ok(())
    }

    /// Run every mission in order and return how each one resolved.
    ///
    /// Stops at the first failing mission.
    pub async fn execute(&mut self) -> Result<CampaignReport, CampaignError> {
        tracing::info!(
            missions = self.missions.len(),
            version = %self.version,
            "Starting deploy campaign"
        );

        let runner = MissionRunner {
            deployer: self.deployer,
            storage: self.storage,
            config: &self.config,
            missions: &self.mission_names,
            version: &self.version,
        };

        let mut report = CampaignReport::default();
        for factory in &self.missions {
            let outcome = runner.run(factory.as_ref(), &mut self.state).await?;
            report.outcomes.push(outcome);
        }

        tracing::info!(
            deployed = report.deployed_count(),
            skipped = report.skipped_count(),
            "Deploy campaign complete"
        );

        Ok(report)
    }

    /// Register `handle` under `instance`, replacing any previous entry.
    pub fn update_state_contract(
        &mut self,
        instance: &str,
        contract_name: &str,
        handle: ContractHandle,
    ) -> Result<(), CampaignError> {
        self.state.update(instance, contract_name, handle)
    }

    pub fn state(&self) -> &ContractState {
        &self.state
    }

    pub fn into_state(self) -> ContractState {
        self.state
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Contract names of the missions, in declared order.
    pub fn mission_names(&self) -> &[String] {
        &self.mission_names
    }
}
