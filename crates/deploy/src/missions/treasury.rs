//! Treasury mission.
//!
//! The treasury needs a staking token. It is either an existing token from the
//! configuration or the mocked token deployed earlier in the same campaign; in
//! the mocked case the deploy admin also grants the treasury an unlimited
//! allowance on the mock once the treasury exists.

use alloy_core::primitives::{Address, U256};

use crate::{
    contract::{ContractCall, DeployArg, ProxyData},
    error::CampaignError,
    traits::{Mission, MissionContext},
};

use super::names::{ACCESS_CONTROLLER, MEOW_TOKEN_MOCK, REGISTRY, TREASURY};

/// Where the staking token comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakingToken {
    /// Token already deployed elsewhere.
    Configured(Address),
    /// Mock deployed by the campaign, read from the contract state.
    Mocked,
}

#[derive(Debug)]
pub struct TreasuryMission {
    staking_token: StakingToken,
}

impl TreasuryMission {
    /// Resolve the staking token source.
    ///
    /// The mock wins when it is part of the campaign and either mocking is
    /// enabled or no token address is configured.
    pub fn new(ctx: &MissionContext<'_>) -> Result<Self, CampaignError> {
        let has_mock = ctx.has_mission(MEOW_TOKEN_MOCK.contract);
        let configured = ctx.config.staking_token_address;

        let staking_token = match configured {
            _ if has_mock && (ctx.config.mock_meow_token || configured.is_none()) => {
                StakingToken::Mocked
            }
            Some(address) => StakingToken::Configured(address),
            None => {
                return Err(CampaignError::config(format!(
                    "no staking token found: set `staking_token_address` or add {} to the campaign",
                    MEOW_TOKEN_MOCK.contract
                )));
            }
        };

        tracing::debug!(?staking_token, "Resolved treasury staking token");

        Ok(Self { staking_token })
    }

    pub fn staking_token(&self) -> StakingToken {
        self.staking_token
    }

    fn is_mocked(&self) -> bool {
        self.staking_token == StakingToken::Mocked
    }
}

impl Mission for TreasuryMission {
    fn contract_name(&self) -> &str {
        TREASURY.contract
    }

    fn instance_name(&self) -> &str {
        TREASURY.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        let mut dependencies = vec![ACCESS_CONTROLLER.instance, REGISTRY.instance];
        if self.is_mocked() {
            dependencies.push(MEOW_TOKEN_MOCK.instance);
        }
        dependencies
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        let staking_token = match self.staking_token {
            StakingToken::Configured(address) => address,
            StakingToken::Mocked => ctx.address(MEOW_TOKEN_MOCK.instance)?,
        };

        Ok(vec![
            DeployArg::Address(ctx.address(ACCESS_CONTROLLER.instance)?),
            DeployArg::Address(ctx.address(REGISTRY.instance)?),
            DeployArg::Address(staking_token),
            DeployArg::Address(ctx.config.zero_vault_address),
        ])
    }

    fn needs_post_deploy(&self, _ctx: &MissionContext<'_>) -> bool {
        self.is_mocked()
    }

    fn post_deploy(&self, ctx: &MissionContext<'_>) -> Result<Vec<ContractCall>, CampaignError> {
        let meow_token = ctx.address(MEOW_TOKEN_MOCK.instance)?;
        let treasury = ctx.address(TREASURY.instance)?;

        Ok(vec![ContractCall::new(
            meow_token,
            ctx.config.deploy_admin,
            "approve",
            vec![DeployArg::Address(treasury), DeployArg::Uint(U256::MAX)],
        )])
    }
}
