//! Campaign configuration loading.
//!
//! Sources, later ones winning: built-in defaults, the TOML file passed with
//! `--config`, then `ZNS_`-prefixed environment variables (nested keys use
//! `__`, e.g. `ZNS_DOMAIN_TOKEN__NAME`). Setting `ZNS_ROOT_PRICE_CONFIG__DECIMALS`
//! or `ZNS_ROOT_PRICE_CONFIG__PRECISION` derives the price precision multiplier.

use std::path::Path;

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use zns_deploy::CampaignConfig;

const ENV_PREFIX: &str = "ZNS_";

/// Base64-encoded, comma-separated governor addresses.
pub const GOVERNOR_ADDRESSES_ENV: &str = "ZNS_GOVERNOR_ADDRESSES";

/// Base64-encoded, comma-separated admin addresses.
pub const ADMIN_ADDRESSES_ENV: &str = "ZNS_ADMIN_ADDRESSES";

pub fn load_config(path: Option<&Path>) -> Result<CampaignConfig> {
    let mut figment = Figment::from(Serialized::defaults(CampaignConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    // The address lists use their own encoding and are decoded below.
    figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["governor_addresses", "admin_addresses"])
            .split("__"),
    );

    let mut config: CampaignConfig = figment
        .extract()
        .context("Failed to load campaign configuration")?;

    if let Some(governors) = env_address_list(GOVERNOR_ADDRESSES_ENV)? {
        config.governor_addresses = governors;
    }
    if let Some(admins) = env_address_list(ADMIN_ADDRESSES_ENV)? {
        config.admin_addresses = admins;
    }
    config
        .root_price_config
        .resolve_precision()
        .context("Invalid root price configuration")?;

    if let Some(path) = path {
        tracing::info!(path = %path.display(), "Configuration loaded");
    }
    Ok(config)
}

fn env_address_list(var: &str) -> Result<Option<Vec<Address>>> {
    match std::env::var(var) {
        Ok(encoded) if !encoded.trim().is_empty() => CampaignConfig::decode_address_list(&encoded)
            .with_context(|| format!("Failed to decode {var}"))
            .map(Some),
        _ => Ok(None),
    }
}
