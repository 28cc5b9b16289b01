//! zns-deploy deploys the Zero Name Service contracts as a resumable campaign.

mod cli;
mod config;

use alloy_core::primitives::{Address, address};
use anyhow::Result;
use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};

use cli::Cli;
use zns_deploy::{
    ArtifactStore, Campaign, CampaignConfig, CampaignReport, ContractDeployer, FileStorageAdapter,
    MemoryStorageAdapter, MissionKind, RpcDeployer, SimulatedDeployer, StorageAdapter,
};

/// Sender of simulated transactions when no deploy admin is configured
/// (first account of the default Anvil and Hardhat mnemonic).
const DRY_RUN_ADMIN: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let config = config::load_config(cli.config.as_deref())?;
    let configured_admin = cli
        .deploy_admin
        .or((!config.deploy_admin.is_zero()).then_some(config.deploy_admin));

    let report = if cli.dry_run {
        let deploy_admin = configured_admin.unwrap_or(DRY_RUN_ADMIN);
        tracing::info!(
            %deploy_admin,
            "Dry run: nothing is sent to the node and no record is written"
        );

        let deployer = SimulatedDeployer::new(deploy_admin);
        let storage = MemoryStorageAdapter::new();
        run_campaign(config.resolve_defaults(deploy_admin), &deployer, &storage).await?
    } else {
        let deploy_admin = match configured_admin {
            Some(admin) => admin,
            None => RpcDeployer::default_account(&cli.rpc_url).await?,
        };
        let artifacts = ArtifactStore::load(&cli.artifacts)?;

        tracing::info!(
            rpc_url = %cli.rpc_url,
            %deploy_admin,
            store = %cli.store.display(),
            artifacts = artifacts.len(),
            "Deploying ZNS contracts..."
        );

        let deployer = RpcDeployer::new(cli.rpc_url.clone(), deploy_admin, artifacts)?;
        let storage = FileStorageAdapter::new(&cli.store);
        run_campaign(config.resolve_defaults(deploy_admin), &deployer, &storage).await?
    };

    println!("{}", report_table(&report));

    Ok(())
}

async fn run_campaign<D, S>(config: CampaignConfig, deployer: &D, storage: &S) -> Result<CampaignReport>
where
    D: ContractDeployer,
    S: StorageAdapter,
{
    // Without a configured token the treasury stakes the mocked one.
    let missions = if config.mock_meow_token || config.staking_token_address.is_none() {
        MissionKind::zns_campaign()
    } else {
        MissionKind::zns_campaign_without_mock()
    };

    let mut campaign = Campaign::new(missions, config, deployer, storage)?;
    Ok(campaign.execute().await?)
}

fn report_table(report: &CampaignReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Contract", "Instance", "Address", "Status", "Post deploy"]);

    for outcome in report.iter() {
        table.add_row(vec![
            outcome.contract.clone(),
            outcome.instance.clone(),
            outcome.address.to_string(),
            if outcome.deployed { "deployed" } else { "skipped" }.to_string(),
            if outcome.post_deployed { "done" } else { "-" }.to_string(),
        ]);
    }

    table
}
