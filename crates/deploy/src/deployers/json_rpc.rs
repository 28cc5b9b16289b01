//! Deployer backed by a node's JSON-RPC endpoint.
//!
//! Transactions are sent with `eth_sendTransaction`, so the node must manage
//! the deploying account (Anvil, Hardhat node, or a node with an unlocked
//! key).

use std::time::Duration;

use alloy_core::primitives::{Address, B256, Bytes, U64, b256};
use anyhow::{Context, Result};
use backon::{ConstantBuilder, Retryable};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{
    artifacts::ArtifactStore,
    contract::{Artifact, ContractCall, ContractHandle, DeployArg, ProxyKind},
    missions::names::{ERC1967_PROXY, TRANSPARENT_PROXY},
    rpc,
    traits::ContractDeployer,
};

/// ERC-1967 storage slot holding the implementation address of a proxy.
pub const ERC1967_IMPLEMENTATION_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_MAX_POLLS: usize = 240;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionReceipt {
    transaction_hash: B256,
    contract_address: Option<Address>,
    status: Option<U64>,
}

impl TransactionReceipt {
    fn succeeded(&self) -> bool {
        self.status == Some(U64::from(1))
    }
}

/// Deploys contracts through a JSON-RPC node.
#[derive(Debug, Clone)]
pub struct RpcDeployer {
    client: reqwest::Client,
    url: Url,
    from: Address,
    artifacts: ArtifactStore,
    poll_interval: Duration,
    max_polls: usize,
}

impl RpcDeployer {
    pub fn new(url: Url, from: Address, artifacts: ArtifactStore) -> Result<Self> {
        Ok(Self {
            client: rpc::create_client()?,
            url,
            from,
            artifacts,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// Change how receipts are polled after a transaction is sent.
    pub fn with_receipt_polling(mut self, interval: Duration, max_polls: usize) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    /// First account managed by the node at `url`.
    pub async fn default_account(url: &Url) -> Result<Address> {
        let client = rpc::create_client()?;
        let accounts: Vec<Address> =
            rpc::json_rpc_call(&client, url.as_str(), "eth_accounts", vec![]).await?;

        accounts
            .first()
            .copied()
            .with_context(|| format!("Node at {url} manages no accounts"))
    }

    pub fn sender(&self) -> Address {
        self.from
    }

    async fn send_transaction(
        &self,
        from: Address,
        to: Option<Address>,
        data: Vec<u8>,
    ) -> Result<TransactionReceipt> {
        let mut tx = json!({ "from": from, "data": Bytes::from(data) });
        if let Some(to) = to {
            tx["to"] = json!(to);
        }

        let hash: B256 =
            rpc::json_rpc_call(&self.client, self.url.as_str(), "eth_sendTransaction", vec![tx])
                .await?;
        tracing::trace!(%hash, "Transaction sent");

        let receipt = self.wait_for_receipt(hash).await?;
        if !receipt.succeeded() {
            anyhow::bail!("Transaction {} reverted", receipt.transaction_hash);
        }

        Ok(receipt)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<TransactionReceipt> {
        let client = &self.client;
        let url = self.url.as_str();

        let fetch = move || async move {
            let receipt: Option<TransactionReceipt> =
                rpc::json_rpc_call(client, url, "eth_getTransactionReceipt", vec![json!(hash)])
                    .await?;
            receipt.with_context(|| format!("Transaction {hash} is not mined yet"))
        };

        fetch
            .retry(
                ConstantBuilder::default()
                    .with_delay(self.poll_interval)
                    .with_max_times(self.max_polls),
            )
            .notify(|err: &anyhow::Error, after: Duration| {
                tracing::trace!(%err, ?after, "Waiting for receipt");
            })
            .await
            .with_context(|| format!("No receipt for transaction {hash}"))
    }

    /// Send a contract creation transaction and return the new address.
    async fn create(&self, name: &str, bytecode: &Bytes, encoded_args: Vec<u8>) -> Result<Address> {
        let mut data = bytecode.to_vec();
        data.extend(encoded_args);

        let receipt = self.send_transaction(self.from, None, data).await?;
        let address = receipt.contract_address.with_context(|| {
            format!(
                "Receipt of {} carries no contract address for {name}",
                receipt.transaction_hash
            )
        })?;

        tracing::debug!(%address, hash = %receipt.transaction_hash, "Created {name}");
        Ok(address)
    }

    /// Constructor arguments of the proxy contract wrapping `implementation`.
    fn proxy_constructor(
        &self,
        kind: ProxyKind,
        implementation: Address,
        init_data: Vec<u8>,
    ) -> Result<(&'static str, Vec<DeployArg>)> {
        let proxy_name = proxy_contract(kind)?;
        let mut args = vec![DeployArg::Address(implementation)];
        if kind == ProxyKind::Transparent {
            args.push(DeployArg::Address(self.from));
        }
        args.push(DeployArg::Bytes(Bytes::from(init_data)));

        Ok((proxy_name, args))
    }
}

/// Artifact name of the proxy contract used for `kind`.
fn proxy_contract(kind: ProxyKind) -> Result<&'static str> {
    match kind {
        ProxyKind::Uups => Ok(ERC1967_PROXY),
        ProxyKind::Transparent => Ok(TRANSPARENT_PROXY),
        ProxyKind::None => anyhow::bail!("A proxy deployment needs a proxy kind"),
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy_contract(&self, name: &str, args: &[DeployArg]) -> Result<ContractHandle> {
        let artifact = self.artifacts.require(name)?;
        let address = self
            .create(name, &artifact.bytecode, DeployArg::encode_params(args))
            .await?;

        Ok(ContractHandle::new(name, address))
    }

    async fn deploy_proxy(
        &self,
        name: &str,
        args: &[DeployArg],
        kind: ProxyKind,
    ) -> Result<ContractHandle> {
        let artifact = self.artifacts.require(name)?;
        let proxy_artifact = self.artifacts.require(proxy_contract(kind)?)?;
        let init_data = DeployArg::encode_call("initialize", args);

        let implementation = self.create(name, &artifact.bytecode, Vec::new()).await?;
        let (proxy_name, proxy_args) = self.proxy_constructor(kind, implementation, init_data)?;
        let proxy = self
            .create(
                proxy_name,
                &proxy_artifact.bytecode,
                DeployArg::encode_params(&proxy_args),
            )
            .await
            .with_context(|| format!("Failed to deploy {proxy_name} for {name}"))?;

        Ok(ContractHandle::new(name, proxy).with_proxy(kind, implementation))
    }

    async fn get_proxy_impl_address(&self, proxy: Address) -> Result<Address> {
        let word: B256 = rpc::json_rpc_call(
            &self.client,
            self.url.as_str(),
            "eth_getStorageAt",
            vec![
                json!(proxy),
                json!(ERC1967_IMPLEMENTATION_SLOT),
                json!("latest"),
            ],
        )
        .await?;

        let implementation = Address::from_word(word);
        if implementation.is_zero() {
            anyhow::bail!("No implementation recorded behind proxy {proxy}");
        }
        Ok(implementation)
    }

    async fn get_contract_object(&self, name: &str, address: Address) -> Result<ContractHandle> {
        let code: Bytes = rpc::json_rpc_call(
            &self.client,
            self.url.as_str(),
            "eth_getCode",
            vec![json!(address), json!("latest")],
        )
        .await?;

        if code.is_empty() {
            anyhow::bail!("No contract code at {address} for {name}");
        }
        Ok(ContractHandle::new(name, address))
    }

    fn get_artifact(&self, name: &str) -> Result<Artifact> {
        self.artifacts.require(name).cloned()
    }

    async fn call(&self, call: &ContractCall) -> Result<()> {
        let receipt = self
            .send_transaction(call.from, Some(call.target), call.calldata())
            .await
            .with_context(|| format!("Call {call} failed"))?;

        tracing::debug!(hash = %receipt.transaction_hash, "Executed {}", call.signature);
        Ok(())
    }
}
