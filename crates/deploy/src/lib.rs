//! zns-deploy - Deployment campaigns for the Zero Name Service contracts.
//!
//! A [`Campaign`] runs an ordered list of missions. Each mission deploys one
//! contract (directly or behind a proxy), persists a record of it, and
//! registers it in the [`ContractState`] so later missions can wire it into
//! their constructor arguments. Contracts that already have a record are
//! reconstructed instead of redeployed, which makes a campaign resumable.

mod artifacts;
pub use artifacts::ArtifactStore;

mod campaign;
pub use campaign::{Campaign, CampaignReport, MissionOutcome};

mod config;
pub use config::{
    CampaignConfig, DEFAULT_DECIMALS, DEFAULT_DOMAIN_TOKEN_NAME, DEFAULT_DOMAIN_TOKEN_SYMBOL,
    DEFAULT_PRECISION, DEFAULT_REGISTRATION_FEE_PERCENT, DEFAULT_ROYALTY_FRACTION,
    DomainTokenConfig, PERCENTAGE_BASIS, PriceConfig, ether,
};

mod contract;
pub use contract::{
    Artifact, ContractCall, ContractHandle, DeployArg, ProxyData, ProxyHandle, ProxyKind,
    format_args_list, selector,
};

pub mod deployers;
pub use deployers::{RpcDeployer, SimulatedDeployer};

mod error;
pub use error::CampaignError;

mod fs;
pub mod missions;
pub use missions::MissionKind;

mod record;
pub use record::{DeploymentRecord, RECORD_VERSION};

mod rpc;

mod state;
pub use state::ContractState;

pub mod storage;
pub use storage::{FileStorageAdapter, MemoryStorageAdapter};

pub mod traits;
pub use traits::{
    ContractDeployer, Mission, MissionContext, MissionDescriptor, MissionFactory, StorageAdapter,
};
