//! Contract deployment collaborator.

use std::future::Future;

use alloy_core::primitives::Address;
use anyhow::Result;

use crate::contract::{Artifact, ContractCall, ContractHandle, DeployArg, ProxyKind};

/// Creates contracts and executes setup transactions.
///
/// Every method may block for as long as the network takes; the campaign
/// imposes no timeout and never has two calls in flight at once.
pub trait ContractDeployer: Send + Sync {
    /// Deploy `name` directly with constructor `args`.
    fn deploy_contract(
        &self,
        name: &str,
        args: &[DeployArg],
    ) -> impl Future<Output = Result<ContractHandle>> + Send;

    /// Deploy `name` behind a proxy of the given kind, initialized with `args`.
    fn deploy_proxy(
        &self,
        name: &str,
        args: &[DeployArg],
        kind: ProxyKind,
    ) -> impl Future<Output = Result<ContractHandle>> + Send;

    /// Logic contract currently behind `proxy`.
    fn get_proxy_impl_address(&self, proxy: Address)
    -> impl Future<Output = Result<Address>> + Send;

    /// Rebuild a handle to a contract that is already deployed at `address`.
    fn get_contract_object(
        &self,
        name: &str,
        address: Address,
    ) -> impl Future<Output = Result<ContractHandle>> + Send;

    /// ABI and bytecode of `name`.
    fn get_artifact(&self, name: &str) -> Result<Artifact>;

    /// Send a state-changing call and wait until it is mined.
    fn call(&self, call: &ContractCall) -> impl Future<Output = Result<()>> + Send;
}
