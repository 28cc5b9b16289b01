//! Seams of the orchestration core.
//!
//! The campaign drives missions and talks to the outside world only through
//! the traits defined here:
//! - [`ContractDeployer`] creates contracts and sends setup transactions,
//! - [`StorageAdapter`] remembers what was already deployed,
//! - [`Mission`] / [`MissionFactory`] describe one unit of deployment work.

mod context;
mod deployer;
mod mission;
mod storage;

pub use context::MissionContext;
pub use deployer::ContractDeployer;
pub use mission::{Mission, MissionDescriptor, MissionFactory};
pub use storage::StorageAdapter;
