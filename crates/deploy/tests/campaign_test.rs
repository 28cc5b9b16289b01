//! Campaign tests against the simulated deployer.
//!
//! Run with: cargo test --test campaign_test

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use alloy_core::primitives::{Address, U256};
use anyhow::Result;
use tempdir::TempDir;
use zns_deploy::{
    Campaign, CampaignConfig, CampaignError, ContractCall, ContractHandle, DeployArg,
    DeploymentRecord, FileStorageAdapter, MemoryStorageAdapter, Mission, MissionContext,
    MissionDescriptor, MissionFactory, MissionKind, ProxyData, ProxyKind, RECORD_VERSION,
    SimulatedDeployer, StorageAdapter,
    deployers::DeployerCall,
    missions::names::{
        ACCESS_CONTROLLER, CURVE_PRICER, FIXED_PRICER, MEOW_TOKEN_MOCK, REGISTRY, ROOT_REGISTRAR,
        SUB_REGISTRAR, TREASURY,
    },
};

const DEPLOY_ADMIN: Address = Address::repeat_byte(0xad);
const ZNS_MISSIONS: usize = 10;
/// Missions up to and including the treasury.
const THROUGH_TREASURY: usize = 7;

/// Initialize tracing for tests (idempotent).
fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

fn config() -> CampaignConfig {
    CampaignConfig::default().resolve_defaults(DEPLOY_ADMIN)
}

fn deployer() -> SimulatedDeployer {
    SimulatedDeployer::new(DEPLOY_ADMIN)
}

/// Memory storage that counts writes and can be told to reject them.
#[derive(Debug, Default)]
struct CountingStorage {
    inner: MemoryStorageAdapter,
    writes: AtomicUsize,
    reject_writes: AtomicBool,
}

impl CountingStorage {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StorageAdapter for CountingStorage {
    async fn get_record(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        self.inner.get_record(name).await
    }

    async fn put_record(&self, name: &str, record: DeploymentRecord) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put_record(name, record).await
    }
}

type Journal = Arc<Mutex<Vec<String>>>;

/// Minimal mission that records what it observed into a shared journal.
#[derive(Debug, Clone)]
struct Step {
    contract: &'static str,
    instance: &'static str,
    proxy: ProxyData,
    reads: Vec<&'static str>,
    post_deploy: bool,
    journal: Journal,
}

impl Step {
    fn new(contract: &'static str, instance: &'static str, journal: &Journal) -> Self {
        Self {
            contract,
            instance,
            proxy: ProxyData::direct(),
            reads: Vec::new(),
            post_deploy: false,
            journal: journal.clone(),
        }
    }

    fn reads(mut self, instance: &'static str) -> Self {
        self.reads.push(instance);
        self
    }

    fn with_post_deploy(mut self) -> Self {
        self.post_deploy = true;
        self
    }

    fn descriptor(self) -> MissionDescriptor {
        Box::new(self)
    }

    fn log(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

impl MissionFactory for Step {
    fn contract_name(&self) -> &str {
        self.contract
    }

    fn build(&self, _ctx: &MissionContext<'_>) -> Result<Box<dyn Mission>, CampaignError> {
        Ok(Box::new(self.clone()))
    }
}

impl Mission for Step {
    fn contract_name(&self) -> &str {
        self.contract
    }

    fn instance_name(&self) -> &str {
        self.instance
    }

    fn proxy(&self) -> ProxyData {
        self.proxy
    }

    fn dependencies(&self) -> Vec<&str> {
        self.reads.clone()
    }

    fn deploy_args(&self, ctx: &MissionContext<'_>) -> Result<Vec<DeployArg>, CampaignError> {
        let visible = ctx.state.instance_names().collect::<Vec<_>>().join(",");
        self.log(format!("{}:[{visible}]", self.instance));

        self.reads
            .iter()
            .map(|instance| ctx.address(instance).map(DeployArg::Address))
            .collect()
    }

    fn pre_deploy(&mut self, _ctx: &MissionContext<'_>) -> Result<(), CampaignError> {
        self.log(format!("pre:{}", self.instance));
        Ok(())
    }

    fn needs_post_deploy(&self, _ctx: &MissionContext<'_>) -> bool {
        self.post_deploy
    }

    fn post_deploy(&self, _ctx: &MissionContext<'_>) -> Result<Vec<ContractCall>, CampaignError> {
        self.log(format!("post:{}", self.instance));
        Ok(Vec::new())
    }
}

fn deployments(calls: &[DeployerCall]) -> Vec<&DeployerCall> {
    calls.iter().filter(|call| call.is_deployment()).collect()
}

fn sent_calls(calls: &[DeployerCall]) -> Vec<&ContractCall> {
    calls
        .iter()
        .filter_map(|call| match call {
            DeployerCall::Call(call) => Some(call),
            _ => None,
        })
        .collect()
}

fn treasury_args(calls: &[DeployerCall]) -> Option<Vec<DeployArg>> {
    calls.iter().find_map(|call| match call {
        DeployerCall::DeployProxy { name, args, .. } if name == TREASURY.contract => {
            Some(args.clone())
        }
        _ => None,
    })
}

#[tokio::test]
async fn test_fresh_run_deploys_and_persists_each_mission_once() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = CountingStorage::default();

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = campaign.execute().await?;

    assert_eq!(deployer.deployment_count(), ZNS_MISSIONS);
    assert_eq!(storage.writes(), ZNS_MISSIONS);
    assert_eq!(campaign.state().len(), ZNS_MISSIONS);
    assert_eq!(report.deployed_count(), ZNS_MISSIONS);
    assert_eq!(report.skipped_count(), 0);
    assert_eq!(report.len(), ZNS_MISSIONS);

    Ok(())
}

#[tokio::test]
async fn test_second_run_reconstructs_without_deploying() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = CountingStorage::default();

    let mut first = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    first.execute().await?;
    let first_addresses = first.state().addresses();
    deployer.take_calls();

    let mut second = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = second.execute().await?;

    let calls = deployer.calls();
    assert!(deployments(&calls).is_empty());
    assert_eq!(storage.writes(), ZNS_MISSIONS);
    assert_eq!(report.skipped_count(), ZNS_MISSIONS);
    assert_eq!(second.state().addresses(), first_addresses);

    // Proxy metadata survives reconstruction.
    let registry = second.state().require(REGISTRY.instance)?;
    assert_eq!(registry.proxy.map(|p| p.kind), Some(ProxyKind::Uups));

    Ok(())
}

#[tokio::test]
async fn test_proxy_missions_use_the_proxy_path() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    campaign.execute().await?;

    let calls = deployer.calls();
    for call in deployments(&calls) {
        match call {
            DeployerCall::DeployContract { name, .. } => {
                assert_eq!(name, ACCESS_CONTROLLER.contract);
                let record = storage.get_record(name).await?.unwrap();
                assert!(record.implementation.is_none());
            }
            DeployerCall::DeployProxy { name, kind, .. } => {
                assert_ne!(name, ACCESS_CONTROLLER.contract);
                assert_ne!(*kind, ProxyKind::None);
                let record = storage.get_record(name).await?.unwrap();
                let handle = campaign.state().iter().find(|(_, h)| &h.name == name).unwrap().1;
                assert_eq!(
                    record.implementation,
                    handle.proxy.map(|proxy| proxy.implementation)
                );
                assert!(record.implementation.is_some());
            }
            other => panic!("unexpected deployment call {other:?}"),
        }
    }

    let meow = deployer
        .calls()
        .into_iter()
        .find_map(|call| match call {
            DeployerCall::DeployProxy { name, kind, .. } if name == MEOW_TOKEN_MOCK.contract => {
                Some(kind)
            }
            _ => None,
        });
    assert_eq!(meow, Some(ProxyKind::Transparent));

    Ok(())
}

#[tokio::test]
async fn test_post_deploy_only_runs_when_needed() -> Result<()> {
    init_test_tracing();
    let journal = Journal::default();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let missions = vec![
        Step::new("First", "first", &journal).descriptor(),
        Step::new("Second", "second", &journal)
            .with_post_deploy()
            .descriptor(),
    ];
    let mut campaign = Campaign::new(missions, config(), &deployer, &storage)?;
    let report = campaign.execute().await?;

    let journal = journal.lock().unwrap().clone();
    assert!(!journal.contains(&"post:first".to_string()));
    assert!(journal.contains(&"post:second".to_string()));
    assert!(!report.outcome("First").unwrap().post_deployed);
    assert!(report.outcome("Second").unwrap().post_deployed);

    Ok(())
}

#[tokio::test]
async fn test_pre_deploy_only_runs_before_a_deployment() -> Result<()> {
    init_test_tracing();
    let journal = Journal::default();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    let missions = || {
        vec![
            Step::new("First", "first", &journal).descriptor(),
            Step::new("Second", "second", &journal)
                .reads("first")
                .with_post_deploy()
                .descriptor(),
        ]
    };

    Campaign::new(missions(), config(), &deployer, &storage)?
        .execute()
        .await?;

    let first_run = std::mem::take(&mut *journal.lock().unwrap());
    assert_eq!(
        first_run,
        vec![
            "pre:first".to_string(),
            "first:[]".to_string(),
            "pre:second".to_string(),
            "second:[first]".to_string(),
            "post:second".to_string(),
        ]
    );

    let report = Campaign::new(missions(), config(), &deployer, &storage)?
        .execute()
        .await?;

    assert_eq!(report.skipped_count(), 2);
    assert_eq!(*journal.lock().unwrap(), vec!["post:second".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_configured_staking_token_skips_the_approval() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    let mut config = config();
    config.staking_token_address = Some(Address::repeat_byte(0x5e));

    let mut campaign =
        Campaign::new(MissionKind::zns_campaign_without_mock(), config, &deployer, &storage)?;
    let report = campaign.execute().await?;

    assert!(
        !deployer
            .calls()
            .iter()
            .any(|call| matches!(call, DeployerCall::Call(_)))
    );
    assert!(!report.outcome(TREASURY.contract).unwrap().post_deployed);

    let treasury_args = deployer.calls().into_iter().find_map(|call| match call {
        DeployerCall::DeployProxy { name, args, .. } if name == TREASURY.contract => Some(args),
        _ => None,
    });
    assert_eq!(
        treasury_args.unwrap()[2],
        DeployArg::Address(Address::repeat_byte(0x5e))
    );

    Ok(())
}

#[tokio::test]
async fn test_missions_only_see_earlier_registrations() -> Result<()> {
    init_test_tracing();
    let journal = Journal::default();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let missions = vec![
        Step::new("Alpha", "alpha", &journal).descriptor(),
        Step::new("Beta", "beta", &journal).reads("alpha").descriptor(),
        Step::new("Gamma", "gamma", &journal)
            .reads("alpha")
            .reads("beta")
            .descriptor(),
    ];
    let mut campaign = Campaign::new(missions, config(), &deployer, &storage)?;
    campaign.execute().await?;

    let observed: Vec<String> = journal
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| !entry.starts_with("pre:"))
        .cloned()
        .collect();
    assert_eq!(
        observed,
        vec![
            "alpha:[]".to_string(),
            "beta:[alpha]".to_string(),
            "gamma:[alpha,beta]".to_string(),
        ]
    );

    let gamma_args = deployer.calls().into_iter().find_map(|call| match call {
        DeployerCall::DeployContract { name, args } if name == "Gamma" => Some(args),
        _ => None,
    });
    assert_eq!(
        gamma_args.unwrap(),
        vec![
            DeployArg::Address(campaign.state().address("alpha")?),
            DeployArg::Address(campaign.state().address("beta")?),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_treasury_without_any_staking_token_fails_at_construction() {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let result = Campaign::new(
        MissionKind::zns_campaign_without_mock(),
        config(),
        &deployer,
        &storage,
    );

    let Err(err) = result else {
        panic!("campaign should not be constructed");
    };
    assert!(matches!(err, CampaignError::Config(_)));
    assert!(err.is_preflight());
    assert!(deployer.calls().is_empty());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_treasury_uses_the_mocked_token_and_approves_it() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    let configured = Address::repeat_byte(0x5e);
    let mut config = config();
    config.staking_token_address = Some(configured);

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config, &deployer, &storage)?;
    let report = campaign.execute().await?;

    let meow = campaign.state().address(MEOW_TOKEN_MOCK.instance)?;
    let treasury = campaign.state().address(TREASURY.instance)?;

    let treasury_args = deployer
        .calls()
        .into_iter()
        .find_map(|call| match call {
            DeployerCall::DeployProxy { name, args, .. } if name == TREASURY.contract => {
                Some(args)
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(treasury_args[2], DeployArg::Address(meow));
    assert!(!treasury_args.contains(&DeployArg::Address(configured)));

    assert!(report.outcome(TREASURY.contract).unwrap().post_deployed);

    let approvals: Vec<_> = deployer
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            DeployerCall::Call(call) => Some(call),
            _ => None,
        })
        .collect();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].target, meow);
    assert_eq!(approvals[0].from, DEPLOY_ADMIN);
    assert_eq!(approvals[0].signature, "approve(address,uint256)");
    assert_eq!(
        approvals[0].args,
        vec![DeployArg::Address(treasury), DeployArg::Uint(U256::MAX)]
    );

    Ok(())
}

#[tokio::test]
async fn test_mocked_token_is_used_when_no_address_is_configured() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    let mut config = config();
    config.mock_meow_token = false;
    config.staking_token_address = None;

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config, &deployer, &storage)?;
    let report = campaign.execute().await?;

    let meow = campaign.state().address(MEOW_TOKEN_MOCK.instance)?;
    let calls = deployer.calls();
    assert_eq!(treasury_args(&calls).unwrap()[2], DeployArg::Address(meow));
    assert!(report.outcome(TREASURY.contract).unwrap().post_deployed);

    let approvals = sent_calls(&calls);
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].target, meow);

    Ok(())
}

#[tokio::test]
async fn test_failed_post_deploy_keeps_the_record_and_retries_on_resume() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    // Access controller takes nonce 0, then every proxy two: the mock proxy lands on 6.
    let meow = DEPLOY_ADMIN.create(6);
    deployer.fail_calls_to(meow);

    let mut first = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let err = first.execute().await.unwrap_err();

    assert!(matches!(
        &err,
        CampaignError::PostDeploy { contract, .. } if contract == TREASURY.contract
    ));
    assert_eq!(first.state().address(MEOW_TOKEN_MOCK.instance)?, meow);
    assert_eq!(storage.len(), THROUGH_TREASURY);
    assert!(storage.names().contains(&TREASURY.contract.to_string()));
    let treasury = storage.get_record(TREASURY.contract).await?.unwrap().address;

    deployer.restore_calls_to(meow);
    deployer.take_calls();

    let mut second = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = second.execute().await?;

    let outcome = report.outcome(TREASURY.contract).unwrap();
    assert!(!outcome.deployed);
    assert!(outcome.post_deployed);
    assert_eq!(outcome.address, treasury);
    assert_eq!(report.deployed_count(), ZNS_MISSIONS - THROUGH_TREASURY);

    let calls = deployer.calls();
    let redeployed: Vec<_> = deployments(&calls)
        .into_iter()
        .filter_map(|call| match call {
            DeployerCall::DeployProxy { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        redeployed,
        vec![ROOT_REGISTRAR.contract, FIXED_PRICER.contract, SUB_REGISTRAR.contract]
    );
    let retried = sent_calls(&calls);
    assert_eq!(retried.len(), 1);
    assert_eq!(retried[0].target, meow);

    Ok(())
}

#[tokio::test]
async fn test_deleted_record_redeploys_only_that_mission() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let mut first = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    first.execute().await?;
    let first_addresses = first.state().addresses();

    storage.remove_record(CURVE_PRICER.contract).unwrap();
    deployer.take_calls();

    let mut second = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = second.execute().await?;

    let calls = deployer.calls();
    let redeployed = deployments(&calls);
    assert_eq!(redeployed.len(), 1);
    assert!(matches!(
        redeployed[0],
        DeployerCall::DeployProxy { name, .. } if name == CURVE_PRICER.contract
    ));

    let reconstructed = calls
        .iter()
        .filter(|call| matches!(call, DeployerCall::GetContractObject { .. }))
        .count();
    assert_eq!(reconstructed, ZNS_MISSIONS - 1);
    assert_eq!(report.deployed_count(), 1);
    assert!(report.outcome(CURVE_PRICER.contract).unwrap().deployed);

    for (instance, address) in second.state().addresses() {
        if instance == CURVE_PRICER.instance {
            assert_ne!(first_addresses[&instance], address);
        } else {
            assert_eq!(first_addresses[&instance], address);
        }
    }
    assert!(storage.names().contains(&CURVE_PRICER.contract.to_string()));

    Ok(())
}

#[tokio::test]
async fn test_failed_deployment_stops_the_campaign_and_resumes() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();
    deployer.fail_deployments_of(TREASURY.contract);

    let mut first = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let err = first.execute().await.unwrap_err();

    assert!(matches!(
        &err,
        CampaignError::Deployment { contract, .. } if contract == TREASURY.contract
    ));
    // Everything before the treasury is persisted, nothing after it ran.
    assert_eq!(storage.len(), 6);
    assert!(!storage.names().contains(&TREASURY.contract.to_string()));

    deployer.restore(TREASURY.contract);
    let mut second = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = second.execute().await?;

    assert_eq!(report.skipped_count(), 6);
    assert_eq!(report.deployed_count(), 4);
    assert_eq!(storage.len(), ZNS_MISSIONS);

    Ok(())
}

#[tokio::test]
async fn test_forward_reference_is_rejected() {
    let journal = Journal::default();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let missions = vec![
        Step::new("Beta", "beta", &journal).reads("alpha").descriptor(),
        Step::new("Alpha", "alpha", &journal).descriptor(),
    ];
    let Err(err) = Campaign::new(missions, config(), &deployer, &storage) else {
        panic!("forward reference should be rejected");
    };

    assert!(matches!(
        &err,
        CampaignError::ForwardReference { mission, dependency }
            if mission == "Beta" && dependency == "alpha"
    ));
    assert!(deployer.calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_mission_is_rejected() {
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let mut missions = MissionKind::zns_campaign();
    missions.push(MissionKind::Registry.descriptor());

    let Err(err) = Campaign::new(missions, config(), &deployer, &storage) else {
        panic!("duplicate mission should be rejected");
    };

    assert!(matches!(
        &err,
        CampaignError::DuplicateMission { contract } if contract == REGISTRY.contract
    ));
}

#[tokio::test]
async fn test_persistence_failure_reports_the_orphaned_address() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = CountingStorage::default();
    storage.reject_writes.store(true, Ordering::SeqCst);

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let err = campaign.execute().await.unwrap_err();

    match err {
        CampaignError::Persistence {
            contract, address, ..
        } => {
            assert_eq!(contract, ACCESS_CONTROLLER.contract);
            assert_eq!(address, Some(DEPLOY_ADMIN.create(0)));
        }
        other => panic!("expected a persistence error, got {other}"),
    }
    assert_eq!(deployer.deployment_count(), 1);
    assert!(campaign.state().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_file_storage_resumes_across_processes() -> Result<()> {
    init_test_tracing();
    let temp_dir = TempDir::new("zns-campaign")?;
    let deployer = deployer();

    {
        let storage = FileStorageAdapter::new(temp_dir.path());
        let mut campaign =
            Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
        campaign.execute().await?;
    }
    deployer.take_calls();

    let storage = FileStorageAdapter::new(temp_dir.path());
    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    let report = campaign.execute().await?;

    assert_eq!(report.skipped_count(), ZNS_MISSIONS);
    assert!(deployments(&deployer.calls()).is_empty());
    assert!(temp_dir.path().join("ZNSRegistry.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_records_carry_the_campaign_version() -> Result<()> {
    init_test_tracing();
    let journal = Journal::default();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    Campaign::new(
        vec![Step::new("Alpha", "alpha", &journal).descriptor()],
        config(),
        &deployer,
        &storage,
    )?
    .execute()
    .await?;

    Campaign::new(
        vec![Step::new("Beta", "beta", &journal).descriptor()],
        config(),
        &deployer,
        &storage,
    )?
    .with_version("2.0.0-rc.1")
    .execute()
    .await?;

    assert_eq!(storage.get_record("Alpha").await?.unwrap().version, RECORD_VERSION);
    assert_eq!(storage.get_record("Beta").await?.unwrap().version, "2.0.0-rc.1");

    Ok(())
}

#[tokio::test]
async fn test_update_state_contract_overwrites_an_entry() -> Result<()> {
    init_test_tracing();
    let deployer = deployer();
    let storage = MemoryStorageAdapter::new();

    let mut campaign = Campaign::new(MissionKind::zns_campaign(), config(), &deployer, &storage)?;
    campaign.execute().await?;
    let order: Vec<String> = campaign.state().instance_names().map(str::to_string).collect();

    let replacement = Address::repeat_byte(0x42);
    campaign.update_state_contract(
        REGISTRY.instance,
        REGISTRY.contract,
        ContractHandle::new(REGISTRY.contract, replacement),
    )?;

    assert_eq!(campaign.state().address(REGISTRY.instance)?, replacement);
    assert_eq!(campaign.state().len(), ZNS_MISSIONS);
    assert_eq!(
        campaign.state().instance_names().collect::<Vec<_>>(),
        order.iter().map(String::as_str).collect::<Vec<_>>()
    );

    let err = campaign
        .update_state_contract(
            REGISTRY.instance,
            REGISTRY.contract,
            ContractHandle::new(TREASURY.contract, Address::repeat_byte(0x43)),
        )
        .unwrap_err();
    assert!(matches!(err, CampaignError::MalformedHandle { .. }));
    assert_eq!(campaign.state().address(REGISTRY.instance)?, replacement);

    Ok(())
}
