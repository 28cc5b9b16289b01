//! Lifecycle of a single mission.
//!
//! `needs_deploy -> [pre_deploy -> deploy] -> needs_post_deploy -> [post_deploy]`

use alloy_core::primitives::Address;
use tracing::Instrument;

use crate::{
    config::CampaignConfig,
    contract::{ContractHandle, format_args_list},
    error::CampaignError,
    record::DeploymentRecord,
    state::ContractState,
    traits::{ContractDeployer, Mission, MissionContext, MissionFactory, StorageAdapter},
};

use super::MissionOutcome;

/// Drives missions through their lifecycle using the campaign's collaborators.
pub(crate) struct MissionRunner<'r, D, S> {
    pub deployer: &'r D,
    pub storage: &'r S,
    pub config: &'r CampaignConfig,
    pub missions: &'r [String],
    pub version: &'r str,
}

impl<D, S> MissionRunner<'_, D, S>
where
    D: ContractDeployer,
    S: StorageAdapter,
{
    fn context<'s>(&'s self, state: &'s ContractState) -> MissionContext<'s> {
        MissionContext::new(self.config, state, self.missions)
    }

    /// Build a fresh mission from `factory` and run it to completion.
    pub async fn run(
        &self,
        factory: &dyn MissionFactory,
        state: &mut ContractState,
    ) -> Result<MissionOutcome, CampaignError> {
        let mut mission = factory.build(&self.context(state))?;

        let span = tracing::info_span!(
            "mission",
            contract = mission.contract_name(),
            instance = mission.instance_name()
        );

        async move {
            let deployed = if self.needs_deploy(mission.as_ref(), state).await? {
                mission.pre_deploy(&self.context(state))?;
                self.deploy(mission.as_ref(), state).await?;
                true
            } else {
                tracing::info!("Skipping {} deployment...", mission.contract_name());
                false
            };

            let post_deployed = if mission.needs_post_deploy(&self.context(state)) {
                self.post_deploy(mission.as_ref(), state).await?;
                true
            } else {
                false
            };

            Ok(MissionOutcome {
                contract: mission.contract_name().to_string(),
                instance: mission.instance_name().to_string(),
                address: state.address(mission.instance_name())?,
                deployed,
                post_deployed,
            })
        }
        .instrument(span)
        .await
    }

    /// Look the mission up in storage. A stored record is turned back into a
    /// live handle and registered; the store itself is never written here.
    async fn needs_deploy(
        &self,
        mission: &dyn Mission,
        state: &mut ContractState,
    ) -> Result<bool, CampaignError> {
        let contract = mission.contract_name();

        let record = self
            .storage
            .get_record(contract)
            .await
            .map_err(|source| CampaignError::Persistence {
                contract: contract.to_string(),
                address: None,
                source,
            })?;

        let Some(record) = record else {
            tracing::debug!("{contract} not found in storage, proceeding to deploy...");
            return Ok(true);
        };

        tracing::debug!(
            address = %record.address,
            version = %record.version,
            "{contract} found in storage, no deployment needed"
        );

        let mut handle = self
            .deployer
            .get_contract_object(contract, record.address)
            .await
            .map_err(|source| CampaignError::Deployment {
                contract: contract.to_string(),
                source,
            })?;

        let proxy = mission.proxy();
        if proxy.is_proxy && handle.proxy.is_none() {
            if let Some(implementation) = record.implementation {
                handle = handle.with_proxy(proxy.kind, implementation);
            }
        }

        state.update(mission.instance_name(), contract, handle)?;
        Ok(false)
    }

    async fn deploy(
        &self,
        mission: &dyn Mission,
        state: &mut ContractState,
    ) -> Result<(), CampaignError> {
        let contract = mission.contract_name();
        let args = mission.deploy_args(&self.context(state))?;
        let proxy = mission.proxy();

        tracing::info!(
            proxy = %proxy.kind,
            "Deploying {contract} with arguments: {}",
            format_args_list(&args)
        );

        let deployed = if proxy.is_proxy {
            self.deployer.deploy_proxy(contract, &args, proxy.kind).await
        } else {
            self.deployer.deploy_contract(contract, &args).await
        };
        let handle = deployed.map_err(|source| CampaignError::Deployment {
            contract: contract.to_string(),
            source,
        })?;

        self.save_record(mission, &handle).await?;

        let address = handle.address;
        state.update(mission.instance_name(), contract, handle)?;

        tracing::info!(%address, "Deployment success for {contract}");
        Ok(())
    }

    async fn save_record(
        &self,
        mission: &dyn Mission,
        handle: &ContractHandle,
    ) -> Result<(), CampaignError> {
        let contract = mission.contract_name();
        let orphaned = |source: anyhow::Error| CampaignError::Persistence {
            contract: contract.to_string(),
            address: Some(handle.address),
            source,
        };

        tracing::debug!("Writing {contract} to storage...");

        let implementation: Option<Address> = if mission.proxy().is_proxy {
            Some(
                self.deployer
                    .get_proxy_impl_address(handle.address)
                    .await
                    .map_err(orphaned)?,
            )
        } else {
            None
        };

        let artifact = self.deployer.get_artifact(contract).map_err(orphaned)?;
        let record =
            DeploymentRecord::new(contract, handle, &artifact, implementation, self.version)
                .map_err(orphaned)?;

        self.storage
            .put_record(contract, record)
            .await
            .map_err(orphaned)
    }

    async fn post_deploy(
        &self,
        mission: &dyn Mission,
        state: &ContractState,
    ) -> Result<(), CampaignError> {
        let contract = mission.contract_name();
        let calls = mission.post_deploy(&self.context(state))?;

        tracing::info!(calls = calls.len(), "Running post-deploy for {contract}");

        for call in &calls {
            tracing::debug!(%call, "Sending post-deploy transaction");
            self.deployer
                .call(call)
                .await
                .map_err(|source| CampaignError::PostDeploy {
                    contract: contract.to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}
