//! Campaign configuration.
//!
//! All defaults live in the [`Default`] impls below. Configuration is validated
//! once, when a [`crate::Campaign`] is created.
//!
//! Numeric fields accept integers as well as decimal or `0x` hex strings, so
//! they can be written naturally in TOML. Prices are ether amounts unless
//! given in hex, which is read as wei.

use alloy_core::primitives::{Address, U256, utils::parse_ether};
use anyhow::Context;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CampaignError;

/// Default name of the domain NFT.
pub const DEFAULT_DOMAIN_TOKEN_NAME: &str = "ZNS Domain Token";
/// Default symbol of the domain NFT.
pub const DEFAULT_DOMAIN_TOKEN_SYMBOL: &str = "ZDT";
/// Default royalty fraction, in basis points.
pub const DEFAULT_ROYALTY_FRACTION: u64 = 200;
/// Default registration fee, in basis points.
pub const DEFAULT_REGISTRATION_FEE_PERCENT: u64 = 222;
/// Denominator of every basis-point value.
pub const PERCENTAGE_BASIS: u64 = 10_000;
/// Token decimals used to derive the precision multiplier.
pub const DEFAULT_DECIMALS: u8 = 18;
/// Significant decimals kept by the price curve.
pub const DEFAULT_PRECISION: u8 = 2;

/// `amount * 10^18`.
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Num(u128),
    Str(String),
}

/// Deserialize a [`U256`] from an integer, a decimal string or a `0x` hex string.
fn deserialize_uint<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Num(n) => Ok(U256::from(n)),
        NumberOrString::Str(s) => s.trim().parse::<U256>().map_err(serde::de::Error::custom),
    }
}

/// Deserialize a price. Integers and decimal strings are ether, hex strings are wei.
fn deserialize_ether<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Num(n) => U256::from(n)
            .checked_mul(ether(1))
            .ok_or_else(|| serde::de::Error::custom(format!("price of {n} ether overflows"))),
        NumberOrString::Str(s) if s.trim().starts_with("0x") => {
            s.trim().parse::<U256>().map_err(serde::de::Error::custom)
        }
        NumberOrString::Str(s) => parse_ether(s.trim()).map_err(serde::de::Error::custom),
    }
}

/// Settings of the domain NFT contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainTokenConfig {
    pub name: String,
    pub symbol: String,
    /// Falls back to the deploy admin when left at zero.
    pub default_royalty_receiver: Address,
    #[serde(deserialize_with = "deserialize_uint")]
    pub default_royalty_fraction: U256,
}

impl Default for DomainTokenConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOMAIN_TOKEN_NAME.to_string(),
            symbol: DEFAULT_DOMAIN_TOKEN_SYMBOL.to_string(),
            default_royalty_receiver: Address::ZERO,
            default_royalty_fraction: U256::from(DEFAULT_ROYALTY_FRACTION),
        }
    }
}

/// Pricing curve for root domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    #[serde(deserialize_with = "deserialize_ether")]
    pub max_price: U256,
    #[serde(deserialize_with = "deserialize_ether")]
    pub min_price: U256,
    #[serde(deserialize_with = "deserialize_uint")]
    pub max_length: U256,
    #[serde(deserialize_with = "deserialize_uint")]
    pub base_length: U256,
    /// Overwritten by [`Self::resolve_precision`] when `decimals` or `precision` is set.
    #[serde(deserialize_with = "deserialize_uint")]
    pub precision_multiplier: U256,
    #[serde(deserialize_with = "deserialize_uint")]
    pub fee_percentage: U256,
    pub is_set: bool,
    /// Decimals of the payment token. Defaults to [`DEFAULT_DECIMALS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Decimals kept by the curve. Defaults to [`DEFAULT_PRECISION`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
}

impl PriceConfig {
    /// Precision multiplier for a token with `decimals` decimals keeping `precision` of them.
    pub fn precision_multiplier(decimals: u8, precision: u8) -> Result<U256, CampaignError> {
        let exponent = decimals.checked_sub(precision).ok_or_else(|| {
            CampaignError::config(format!(
                "precision ({precision}) cannot exceed token decimals ({decimals})"
            ))
        })?;
        Ok(U256::from(10u64).pow(U256::from(exponent)))
    }

    /// Derive `precision_multiplier` from `decimals` and `precision` if either is set.
    pub fn resolve_precision(&mut self) -> Result<(), CampaignError> {
        if self.decimals.is_none() && self.precision.is_none() {
            return Ok(());
        }

        self.precision_multiplier = Self::precision_multiplier(
            self.decimals.unwrap_or(DEFAULT_DECIMALS),
            self.precision.unwrap_or(DEFAULT_PRECISION),
        )?;
        Ok(())
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            max_price: ether(25_000),
            min_price: ether(2_000),
            max_length: U256::from(50u64),
            base_length: U256::from(4u64),
            // 10^(DEFAULT_DECIMALS - DEFAULT_PRECISION)
            precision_multiplier: U256::from(10u64).pow(U256::from(16u64)),
            fee_percentage: U256::from(DEFAULT_REGISTRATION_FEE_PERCENT),
            is_set: true,
            decimals: None,
            precision: None,
        }
    }
}

/// Everything the ZNS missions read besides the contract state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Account sending every transaction of the campaign.
    pub deploy_admin: Address,
    /// Accounts granted the governor role. Defaults to the deploy admin.
    pub governor_addresses: Vec<Address>,
    /// Accounts granted the admin role. Defaults to the deploy admin.
    pub admin_addresses: Vec<Address>,
    pub domain_token: DomainTokenConfig,
    pub root_price_config: PriceConfig,
    /// Fee beneficiary. Defaults to the deploy admin.
    pub zero_vault_address: Address,
    /// Existing staking token. Required unless the campaign deploys a mocked token.
    pub staking_token_address: Option<Address>,
    /// Deploy a mock staking token instead of using `staking_token_address`.
    pub mock_meow_token: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            deploy_admin: Address::ZERO,
            governor_addresses: Vec::new(),
            admin_addresses: Vec::new(),
            domain_token: DomainTokenConfig::default(),
            root_price_config: PriceConfig::default(),
            zero_vault_address: Address::ZERO,
            staking_token_address: None,
            mock_meow_token: true,
        }
    }
}

impl CampaignConfig {
    /// Fill every unset account with `deploy_admin`.
    pub fn resolve_defaults(mut self, deploy_admin: Address) -> Self {
        self.deploy_admin = deploy_admin;
        if self.governor_addresses.is_empty() {
            self.governor_addresses.push(deploy_admin);
        }
        if self.admin_addresses.is_empty() {
            self.admin_addresses.push(deploy_admin);
        }
        if self.domain_token.default_royalty_receiver == Address::ZERO {
            self.domain_token.default_royalty_receiver = deploy_admin;
        }
        if self.zero_vault_address == Address::ZERO {
            self.zero_vault_address = deploy_admin;
        }
        self
    }

    pub fn validate(&self) -> Result<(), CampaignError> {
        if self.deploy_admin == Address::ZERO {
            return Err(CampaignError::config("deploy admin is not set"));
        }
        if self.governor_addresses.is_empty() {
            return Err(CampaignError::config("at least one governor address is required"));
        }
        if self.admin_addresses.is_empty() {
            return Err(CampaignError::config("at least one admin address is required"));
        }
        if self.zero_vault_address == Address::ZERO {
            return Err(CampaignError::config("zero vault address is not set"));
        }
        let price = &self.root_price_config;
        if price.min_price > price.max_price {
            return Err(CampaignError::config(format!(
                "min price ({}) is greater than max price ({})",
                price.min_price, price.max_price
            )));
        }
        if price.base_length > price.max_length {
            return Err(CampaignError::config(format!(
                "base length ({}) is greater than max length ({})",
                price.base_length, price.max_length
            )));
        }
        if price.precision_multiplier.is_zero() {
            return Err(CampaignError::config("precision multiplier cannot be zero"));
        }
        if price.fee_percentage > U256::from(PERCENTAGE_BASIS) {
            return Err(CampaignError::config(format!(
                "fee percentage ({}) exceeds {PERCENTAGE_BASIS} basis points",
                price.fee_percentage
            )));
        }
        if self.domain_token.default_royalty_fraction > U256::from(PERCENTAGE_BASIS) {
            return Err(CampaignError::config(format!(
                "royalty fraction ({}) exceeds {PERCENTAGE_BASIS} basis points",
                self.domain_token.default_royalty_fraction
            )));
        }

        Ok(())
    }

    /// Decode a base64-encoded, comma-separated address list.
    ///
    /// This is the format of the `ZNS_GOVERNOR_ADDRESSES` and `ZNS_ADMIN_ADDRESSES`
    /// environment variables.
    pub fn decode_address_list(encoded: &str) -> anyhow::Result<Vec<Address>> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .context("Address list is not valid base64")?;
        let decoded = String::from_utf8(decoded).context("Address list is not valid UTF-8")?;

        decoded
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<Address>()
                    .with_context(|| format!("Invalid address in list: {item}"))
            })
            .collect()
    }
}
