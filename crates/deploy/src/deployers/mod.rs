//! [`ContractDeployer`](crate::traits::ContractDeployer) implementations.

mod json_rpc;
mod simulated;

pub use json_rpc::{ERC1967_IMPLEMENTATION_SLOT, RpcDeployer};
pub use simulated::{DeployerCall, SimulatedDeployer};
