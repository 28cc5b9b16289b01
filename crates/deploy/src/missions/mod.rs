//! ZNS deployment missions.

mod contracts;
pub mod names;
mod treasury;

pub use contracts::{
    AccessControllerMission, AddressResolverMission, CurvePricerMission, DomainTokenMission,
    FixedPricerMission, MEOW_TOKEN_MOCK_NAME, MEOW_TOKEN_MOCK_SYMBOL, MeowTokenMockMission,
    RegistryMission, RootRegistrarMission, SubRegistrarMission, price_config_arg,
};
pub use treasury::{StakingToken, TreasuryMission};

use crate::{
    error::CampaignError,
    traits::{Mission, MissionContext, MissionDescriptor, MissionFactory},
};

use names::ContractNames;

/// The concrete missions of the ZNS deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum MissionKind {
    AccessController,
    Registry,
    DomainToken,
    MeowTokenMock,
    AddressResolver,
    CurvePricer,
    Treasury,
    RootRegistrar,
    FixedPricer,
    SubRegistrar,
}

impl MissionKind {
    pub fn names(&self) -> ContractNames {
        match self {
            Self::AccessController => names::ACCESS_CONTROLLER,
            Self::Registry => names::REGISTRY,
            Self::DomainToken => names::DOMAIN_TOKEN,
            Self::MeowTokenMock => names::MEOW_TOKEN_MOCK,
            Self::AddressResolver => names::ADDRESS_RESOLVER,
            Self::CurvePricer => names::CURVE_PRICER,
            Self::Treasury => names::TREASURY,
            Self::RootRegistrar => names::ROOT_REGISTRAR,
            Self::FixedPricer => names::FIXED_PRICER,
            Self::SubRegistrar => names::SUB_REGISTRAR,
        }
    }

    /// Full ZNS deployment, mocked staking token included.
    pub fn zns_campaign() -> Vec<MissionDescriptor> {
        Self::zns_order(true)
    }

    /// ZNS deployment against an existing staking token.
    pub fn zns_campaign_without_mock() -> Vec<MissionDescriptor> {
        Self::zns_order(false)
    }

    fn zns_order(with_mock: bool) -> Vec<MissionDescriptor> {
        [
            Self::AccessController,
            Self::Registry,
            Self::DomainToken,
            Self::MeowTokenMock,
            Self::AddressResolver,
            Self::CurvePricer,
            Self::Treasury,
            Self::RootRegistrar,
            Self::FixedPricer,
            Self::SubRegistrar,
        ]
        .into_iter()
        .filter(|kind| with_mock || *kind != Self::MeowTokenMock)
        .map(Self::descriptor)
        .collect()
    }

    pub fn descriptor(self) -> MissionDescriptor {
        Box::new(self)
    }
}

impl MissionFactory for MissionKind {
    fn contract_name(&self) -> &str {
        self.names().contract
    }

    fn build(&self, ctx: &MissionContext<'_>) -> Result<Box<dyn Mission>, CampaignError> {
        Ok(match self {
            Self::AccessController => Box::new(AccessControllerMission),
            Self::Registry => Box::new(RegistryMission),
            Self::DomainToken => Box::new(DomainTokenMission),
            Self::MeowTokenMock => Box::new(MeowTokenMockMission),
            Self::AddressResolver => Box::new(AddressResolverMission),
            Self::CurvePricer => Box::new(CurvePricerMission),
            Self::Treasury => Box::new(TreasuryMission::new(ctx)?),
            Self::RootRegistrar => Box::new(RootRegistrarMission),
            Self::FixedPricer => Box::new(FixedPricerMission),
            Self::SubRegistrar => Box::new(SubRegistrarMission),
        })
    }
}
