use std::path::PathBuf;

use alloy_core::primitives::Address;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use url::Url;

/// The default JSON-RPC endpoint (a local Anvil or Hardhat node).
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

#[derive(Parser)]
#[command(name = "zns-deploy")]
#[command(author, version, about = "Deploy the Zero Name Service contracts")]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "ZNS_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// The URL of the JSON-RPC node sending the transactions.
    ///
    /// The node must manage the deploy admin account (`eth_sendTransaction`).
    #[arg(long, alias = "rpc", env = "ZNS_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: Url,

    /// The account deploying the contracts.
    ///
    /// Overrides `deploy_admin` from the configuration file. If neither is set,
    /// the first account of the node is used.
    #[arg(long, alias = "admin", env = "ZNS_DEPLOY_ADMIN")]
    pub deploy_admin: Option<Address>,

    /// The path to the Hardhat artifacts directory.
    #[arg(long, env = "ZNS_ARTIFACTS", default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// The directory holding deployment records, one JSON file per contract.
    ///
    /// Contracts with a record are not redeployed. Delete a record to force a
    /// redeploy of that contract.
    #[arg(long, env = "ZNS_STORE", default_value = "deployments")]
    pub store: PathBuf,

    /// Path to a TOML campaign configuration file.
    #[arg(long, alias = "conf", env = "ZNS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run the campaign against an in-process simulated chain.
    ///
    /// Nothing is sent to the node and no record is written to the store.
    #[arg(long, env = "ZNS_DRY_RUN")]
    pub dry_run: bool,
}
