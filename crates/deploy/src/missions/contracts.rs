//! Missions whose arguments are plain reads of config and earlier contracts.

use crate::{
    config::PriceConfig,
    contract::{DeployArg, ProxyData},
    error::CampaignError,
    traits::{Mission, MissionContext},
};

use super::names::{
    ACCESS_CONTROLLER, ADDRESS_RESOLVER, CURVE_PRICER, DOMAIN_TOKEN, FIXED_PRICER,
    MEOW_TOKEN_MOCK, REGISTRY, ROOT_REGISTRAR, SUB_REGISTRAR, TREASURY,
};

/// Name of the mocked staking token.
pub const MEOW_TOKEN_MOCK_NAME: &str = "MEOW";
/// Symbol of the mocked staking token.
pub const MEOW_TOKEN_MOCK_SYMBOL: &str = "MEOW";

fn address_arg(ctx: &MissionContext<'_>, instance: &str) -> Result<DeployArg, CampaignError> {
    ctx.address(instance).map(DeployArg::Address)
}

/// Root of the role system. Deployed directly with the governor and admin lists.
#[derive(Debug, Default)]
pub struct AccessControllerMission;

impl Mission for AccessControllerMission {
    fn contract_name(&self) -> &str {
        ACCESS_CONTROLLER.contract
    }

    fn instance_name(&self) -> &str {
        ACCESS_CONTROLLER.instance
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![
            DeployArg::AddressList(ctx.config.governor_addresses.clone()),
            DeployArg::AddressList(ctx.config.admin_addresses.clone()),
        ])
    }
}

#[derive(Debug, Default)]
pub struct RegistryMission;

impl Mission for RegistryMission {
    fn contract_name(&self) -> &str {
        REGISTRY.contract
    }

    fn instance_name(&self) -> &str {
        REGISTRY.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![ACCESS_CONTROLLER.instance]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![address_arg(ctx, ACCESS_CONTROLLER.instance)?])
    }
}

#[derive(Debug, Default)]
pub struct DomainTokenMission;

impl Mission for DomainTokenMission {
    fn contract_name(&self) -> &str {
        DOMAIN_TOKEN.contract
    }

    fn instance_name(&self) -> &str {
        DOMAIN_TOKEN.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![ACCESS_CONTROLLER.instance]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        let token = &ctx.config.domain_token;
        Ok(vec![
            address_arg(ctx, ACCESS_CONTROLLER.instance)?,
            DeployArg::String(token.name.clone()),
            DeployArg::String(token.symbol.clone()),
            DeployArg::Address(token.default_royalty_receiver),
            DeployArg::Uint(token.default_royalty_fraction),
        ])
    }
}

/// Test stand-in for the staking token.
#[derive(Debug, Default)]
pub struct MeowTokenMockMission;

impl Mission for MeowTokenMockMission {
    fn contract_name(&self) -> &str {
        MEOW_TOKEN_MOCK.contract
    }

    fn instance_name(&self) -> &str {
        MEOW_TOKEN_MOCK.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::transparent()
    }

    fn deploy_args(&self, _ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![
            DeployArg::String(MEOW_TOKEN_MOCK_NAME.to_string()),
            DeployArg::String(MEOW_TOKEN_MOCK_SYMBOL.to_string()),
        ])
    }
}

#[derive(Debug, Default)]
pub struct AddressResolverMission;

impl Mission for AddressResolverMission {
    fn contract_name(&self) -> &str {
        ADDRESS_RESOLVER.contract
    }

    fn instance_name(&self) -> &str {
        ADDRESS_RESOLVER.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![ACCESS_CONTROLLER.instance, REGISTRY.instance]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![
            address_arg(ctx, ACCESS_CONTROLLER.instance)?,
            address_arg(ctx, REGISTRY.instance)?,
        ])
    }
}

/// Encode a price config as the tuple the pricer initializer expects.
pub fn price_config_arg(config: &PriceConfig) -> DeployArg {
    DeployArg::Tuple(vec![
        DeployArg::Uint(config.max_price),
        DeployArg::Uint(config.min_price),
        DeployArg::Uint(config.max_length),
        DeployArg::Uint(config.base_length),
        DeployArg::Uint(config.precision_multiplier),
        DeployArg::Uint(config.fee_percentage),
        DeployArg::Bool(config.is_set),
    ])
}

#[derive(Debug, Default)]
pub struct CurvePricerMission;

impl Mission for CurvePricerMission {
    fn contract_name(&self) -> &str {
        CURVE_PRICER.contract
    }

    fn instance_name(&self) -> &str {
        CURVE_PRICER.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![ACCESS_CONTROLLER.instance, REGISTRY.instance]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![
            address_arg(ctx, ACCESS_CONTROLLER.instance)?,
            address_arg(ctx, REGISTRY.instance)?,
            price_config_arg(&ctx.config.root_price_config),
        ])
    }
}

#[derive(Debug, Default)]
pub struct RootRegistrarMission;

impl Mission for RootRegistrarMission {
    fn contract_name(&self) -> &str {
        ROOT_REGISTRAR.contract
    }

    fn instance_name(&self) -> &str {
        ROOT_REGISTRAR.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![
            ACCESS_CONTROLLER.instance,
            REGISTRY.instance,
            CURVE_PRICER.instance,
            TREASURY.instance,
            DOMAIN_TOKEN.instance,
        ]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        self.dependencies()
            .into_iter()
            .map(|instance| address_arg(ctx, instance))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct FixedPricerMission;

impl Mission for FixedPricerMission {
    fn contract_name(&self) -> &str {
        FIXED_PRICER.contract
    }

    fn instance_name(&self) -> &str {
        FIXED_PRICER.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![ACCESS_CONTROLLER.instance, REGISTRY.instance]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        Ok(vec![
            address_arg(ctx, ACCESS_CONTROLLER.instance)?,
            address_arg(ctx, REGISTRY.instance)?,
        ])
    }
}

#[derive(Debug, Default)]
pub struct SubRegistrarMission;

impl Mission for SubRegistrarMission {
    fn contract_name(&self) -> &str {
        SUB_REGISTRAR.contract
    }

    fn instance_name(&self) -> &str {
        SUB_REGISTRAR.instance
    }

    fn proxy(&self) -> ProxyData {
        ProxyData::uups()
    }

    fn dependencies(&self) -> Vec<&str> {
        vec![
            ACCESS_CONTROLLER.instance,
            REGISTRY.instance,
            ROOT_REGISTRAR.instance,
        ]
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        self.dependencies()
            .into_iter()
            .map(|instance| address_arg(ctx, instance))
            .collect()
    }
}
