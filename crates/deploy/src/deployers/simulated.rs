//! Deterministic in-process deployer.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use alloy_core::primitives::{Address, Bytes, keccak256};
use anyhow::Result;

use crate::{
    artifacts::ArtifactStore,
    contract::{Artifact, ContractCall, ContractHandle, DeployArg, ProxyKind},
    traits::ContractDeployer,
};

/// One invocation recorded by [`SimulatedDeployer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployerCall {
    DeployContract {
        name: String,
        args: Vec<DeployArg>,
    },
    DeployProxy {
        name: String,
        args: Vec<DeployArg>,
        kind: ProxyKind,
    },
    GetProxyImplAddress {
        proxy: Address,
    },
    GetContractObject {
        name: String,
        address: Address,
    },
    Call(ContractCall),
}

impl DeployerCall {
    /// Whether this call created a contract.
    pub fn is_deployment(&self) -> bool {
        matches!(self, Self::DeployContract { .. } | Self::DeployProxy { .. })
    }
}

#[derive(Debug, Default)]
struct SimulatedChain {
    nonce: u64,
    contracts: HashMap<Address, String>,
    implementations: HashMap<Address, (ProxyKind, Address)>,
    calls: Vec<DeployerCall>,
    failing: HashSet<String>,
    failing_targets: HashSet<Address>,
}

impl SimulatedChain {
    fn next_address(&mut self, sender: Address, name: &str) -> Address {
        let address = sender.create(self.nonce);
        self.nonce += 1;
        self.contracts.insert(address, name.to_string());
        address
    }
}

/// Deployer that never leaves the process.
///
/// Contract addresses are derived from the sender and a local nonce the same
/// way the EVM derives `CREATE` addresses. A proxy deployment consumes two
/// nonces: implementation first, then the proxy. Every call is recorded and
/// can be inspected with [`Self::calls`].
#[derive(Debug)]
pub struct SimulatedDeployer {
    sender: Address,
    artifacts: ArtifactStore,
    chain: Mutex<SimulatedChain>,
}

impl SimulatedDeployer {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            artifacts: ArtifactStore::default(),
            chain: Mutex::new(SimulatedChain::default()),
        }
    }

    /// Serve artifacts from `artifacts` instead of synthesizing them.
    pub fn with_artifacts(mut self, artifacts: ArtifactStore) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Make every deployment of `name` fail, as a reverting constructor would.
    pub fn fail_deployments_of(&self, name: impl Into<String>) {
        self.chain().failing.insert(name.into());
    }

    /// Stop failing deployments of `name`.
    pub fn restore(&self, name: &str) {
        self.chain().failing.remove(name);
    }

    /// Make every call to the contract at `target` revert.
    pub fn fail_calls_to(&self, target: Address) {
        self.chain().failing_targets.insert(target);
    }

    /// Stop failing calls to `target`.
    pub fn restore_calls_to(&self, target: Address) {
        self.chain().failing_targets.remove(&target);
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<DeployerCall> {
        self.chain().calls.clone()
    }

    /// Return and forget the recorded calls.
    pub fn take_calls(&self) -> Vec<DeployerCall> {
        std::mem::take(&mut self.chain().calls)
    }

    /// Number of contract creations recorded so far.
    pub fn deployment_count(&self) -> usize {
        self.chain().calls.iter().filter(|c| c.is_deployment()).count()
    }

    fn chain(&self) -> MutexGuard<'_, SimulatedChain> {
        self.chain.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(chain: &SimulatedChain, name: &str) -> Result<()> {
        if chain.failing.contains(name) {
            anyhow::bail!("Simulated deployment of {name} reverted");
        }
        Ok(())
    }
}

impl ContractDeployer for SimulatedDeployer {
    async fn deploy_contract(&self, name: &str, args: &[DeployArg]) -> Result<ContractHandle> {
        let mut chain = self.chain();
        chain.calls.push(DeployerCall::DeployContract {
            name: name.to_string(),
            args: args.to_vec(),
        });
        Self::check_failure(&chain, name)?;

        let address = chain.next_address(self.sender, name);
        tracing::debug!(%address, "Simulated deployment of {name}");

        Ok(ContractHandle::new(name, address))
    }

    async fn deploy_proxy(
        &self,
        name: &str,
        args: &[DeployArg],
        kind: ProxyKind,
    ) -> Result<ContractHandle> {
        let mut chain = self.chain();
        chain.calls.push(DeployerCall::DeployProxy {
            name: name.to_string(),
            args: args.to_vec(),
            kind,
        });
        Self::check_failure(&chain, name)?;

        let implementation = chain.next_address(self.sender, name);
        let proxy = chain.next_address(self.sender, name);
        chain.implementations.insert(proxy, (kind, implementation));
        tracing::debug!(%proxy, %implementation, %kind, "Simulated proxy deployment of {name}");

        Ok(ContractHandle::new(name, proxy).with_proxy(kind, implementation))
    }

    async fn get_proxy_impl_address(&self, proxy: Address) -> Result<Address> {
        let mut chain = self.chain();
        chain.calls.push(DeployerCall::GetProxyImplAddress { proxy });

        chain
            .implementations
            .get(&proxy)
            .map(|(_, implementation)| *implementation)
            .ok_or_else(|| anyhow::anyhow!("No proxy deployed at {proxy}"))
    }

    async fn get_contract_object(&self, name: &str, address: Address) -> Result<ContractHandle> {
        let mut chain = self.chain();
        chain.calls.push(DeployerCall::GetContractObject {
            name: name.to_string(),
            address,
        });

        let handle = ContractHandle::new(name, address);
        Ok(match chain.implementations.get(&address) {
            Some((kind, implementation)) => handle.with_proxy(*kind, *implementation),
            None => handle,
        })
    }

    fn get_artifact(&self, name: &str) -> Result<Artifact> {
        if let Some(artifact) = self.artifacts.get(name) {
            return Ok(artifact.clone());
        }

        Ok(Artifact {
            abi: serde_json::Value::Array(Vec::new()),
            bytecode: Bytes::from(keccak256(name.as_bytes()).to_vec()),
        })
    }

    async fn call(&self, call: &ContractCall) -> Result<()> {
        let mut chain = self.chain();
        if !chain.contracts.contains_key(&call.target) {
            tracing::debug!(contract = %call.target, "Simulated call to a contract this deployer did not create");
        }
        chain.calls.push(DeployerCall::Call(call.clone()));

        if chain.failing_targets.contains(&call.target) {
            anyhow::bail!("Simulated call to {} reverted", call.target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployer() -> SimulatedDeployer {
        SimulatedDeployer::new(Address::repeat_byte(0xde))
    }

    #[tokio::test]
    async fn addresses_follow_create_derivation() {
        let deployer = deployer();

        let first = deployer.deploy_contract("A", &[]).await.unwrap();
        let second = deployer.deploy_contract("B", &[]).await.unwrap();

        assert_eq!(first.address, deployer.sender().create(0));
        assert_eq!(second.address, deployer.sender().create(1));
    }

    #[tokio::test]
    async fn proxy_consumes_two_nonces() {
        let deployer = deployer();

        let proxy = deployer
            .deploy_proxy("ZNSRegistry", &[], ProxyKind::Uups)
            .await
            .unwrap();

        let sender = deployer.sender();
        assert_eq!(proxy.address, sender.create(1));
        assert_eq!(
            deployer.get_proxy_impl_address(proxy.address).await.unwrap(),
            sender.create(0)
        );
        assert_eq!(proxy.proxy.unwrap().kind, ProxyKind::Uups);
    }

    #[tokio::test]
    async fn failing_contract_reverts_until_restored() {
        let deployer = deployer();
        deployer.fail_deployments_of("ZNSTreasury");

        assert!(deployer.deploy_contract("ZNSTreasury", &[]).await.is_err());

        deployer.restore("ZNSTreasury");
        assert!(deployer.deploy_contract("ZNSTreasury", &[]).await.is_ok());
        assert_eq!(deployer.deployment_count(), 2);
    }

    #[tokio::test]
    async fn failing_target_reverts_calls_until_restored() {
        let deployer = deployer();
        let token = deployer.deploy_contract("MeowTokenMock", &[]).await.unwrap();
        let call = ContractCall::new(
            token.address,
            deployer.sender(),
            "approve",
            vec![DeployArg::Address(Address::repeat_byte(1))],
        );
        deployer.fail_calls_to(token.address);

        assert!(deployer.call(&call).await.is_err());

        deployer.restore_calls_to(token.address);
        assert!(deployer.call(&call).await.is_ok());
        assert_eq!(
            deployer
                .calls()
                .iter()
                .filter(|c| matches!(c, DeployerCall::Call(_)))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn reconstruction_is_not_a_deployment() {
        let deployer = deployer();
        let address = Address::repeat_byte(0x77);

        let handle = deployer.get_contract_object("ZNSRegistry", address).await.unwrap();

        assert_eq!(handle.address, address);
        assert!(!handle.is_proxy());
        assert_eq!(deployer.deployment_count(), 0);
        assert_eq!(deployer.take_calls().len(), 1);
        assert!(deployer.calls().is_empty());
    }

    #[test]
    fn synthesized_artifacts_are_stable() {
        let deployer = deployer();

        let a = deployer.get_artifact("ZNSRegistry").unwrap();
        let b = deployer.get_artifact("ZNSRegistry").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.bytecode.len(), 32);
    }
}
