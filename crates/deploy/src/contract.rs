//! Runtime contract handles, proxy descriptors and constructor arguments.

use std::fmt;

use alloy_core::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, U256, keccak256},
};
use serde::{Deserialize, Serialize};

/// Proxy pattern used to deploy a contract.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProxyKind {
    /// Deployed directly, no proxy.
    #[default]
    None,
    /// ERC-1967 proxy whose upgrade logic lives in the implementation.
    Uups,
    /// Transparent upgradeable proxy with an external admin.
    Transparent,
}

/// Static proxy configuration of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProxyData {
    pub is_proxy: bool,
    pub kind: ProxyKind,
}

impl ProxyData {
    /// A plain, non-upgradeable deployment.
    pub const fn direct() -> Self {
        Self {
            is_proxy: false,
            kind: ProxyKind::None,
        }
    }

    pub const fn uups() -> Self {
        Self {
            is_proxy: true,
            kind: ProxyKind::Uups,
        }
    }

    pub const fn transparent() -> Self {
        Self {
            is_proxy: true,
            kind: ProxyKind::Transparent,
        }
    }
}

/// Proxy metadata attached to a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyHandle {
    pub kind: ProxyKind,
    /// Address of the logic contract behind the proxy.
    pub implementation: Address,
}

/// Live handle to a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractHandle {
    /// Artifact name of the contract (e.g. `ZNSRegistry`).
    pub name: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyHandle>,
}

impl ContractHandle {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, kind: ProxyKind, implementation: Address) -> Self {
        self.proxy = Some(ProxyHandle {
            kind,
            implementation,
        });
        self
    }

    pub fn is_proxy(&self) -> bool {
        self.proxy.is_some()
    }
}

/// Interface description and creation bytecode of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

/// A constructor or initializer argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DeployArg {
    Address(Address),
    AddressList(Vec<Address>),
    Uint(U256),
    Bool(bool),
    String(String),
    Bytes(Bytes),
    /// A struct argument, encoded as a tuple of its fields.
    Tuple(Vec<DeployArg>),
}

impl DeployArg {
    /// Solidity type of the argument as it appears in a function signature.
    pub fn sol_type(&self) -> String {
        match self {
            Self::Address(_) => "address".to_string(),
            Self::AddressList(_) => "address[]".to_string(),
            Self::Uint(_) => "uint256".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::String(_) => "string".to_string(),
            Self::Bytes(_) => "bytes".to_string(),
            Self::Tuple(fields) => format!(
                "({})",
                fields
                    .iter()
                    .map(Self::sol_type)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        match self {
            Self::Address(address) => DynSolValue::Address(*address),
            Self::AddressList(addresses) => DynSolValue::Array(
                addresses.iter().copied().map(DynSolValue::Address).collect(),
            ),
            Self::Uint(value) => DynSolValue::Uint(*value, 256),
            Self::Bool(value) => DynSolValue::Bool(*value),
            Self::String(value) => DynSolValue::String(value.clone()),
            Self::Bytes(value) => DynSolValue::Bytes(value.to_vec()),
            Self::Tuple(fields) => {
                DynSolValue::Tuple(fields.iter().map(Self::to_sol_value).collect())
            }
        }
    }

    /// ABI-encode a list of arguments as function (or constructor) parameters.
    pub fn encode_params(args: &[DeployArg]) -> Vec<u8> {
        DynSolValue::Tuple(args.iter().map(Self::to_sol_value).collect()).abi_encode_params()
    }

    /// Canonical signature of `function` taking `args`, e.g. `initialize(address,uint256)`.
    pub fn signature(function: &str, args: &[DeployArg]) -> String {
        format!(
            "{function}({})",
            args.iter().map(Self::sol_type).collect::<Vec<_>>().join(",")
        )
    }

    /// Calldata for `function(args)`: 4-byte selector followed by the encoded arguments.
    pub fn encode_call(function: &str, args: &[DeployArg]) -> Vec<u8> {
        let mut data = selector(&Self::signature(function, args)).to_vec();
        data.extend(Self::encode_params(args));
        data
    }
}

/// First four bytes of the keccak hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

impl fmt::Display for DeployArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::AddressList(addresses) => {
                let items = addresses.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "[{}]", items.join(", "))
            }
            Self::Uint(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Bytes(value) => write!(f, "{value}"),
            Self::Tuple(fields) => {
                let items = fields.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "({})", items.join(", "))
            }
        }
    }
}

/// Render a list of arguments for log lines.
pub fn format_args_list(args: &[DeployArg]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A state-changing call on an already deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub target: Address,
    pub from: Address,
    /// Canonical function signature, e.g. `approve(address,uint256)`.
    pub signature: String,
    pub args: Vec<DeployArg>,
}

impl ContractCall {
    pub fn new(target: Address, from: Address, function: &str, args: Vec<DeployArg>) -> Self {
        Self {
            target,
            from,
            signature: DeployArg::signature(function, &args),
            args,
        }
    }

    pub fn selector(&self) -> [u8; 4] {
        selector(&self.signature)
    }

    /// Selector followed by the ABI-encoded arguments.
    pub fn calldata(&self) -> Vec<u8> {
        let mut data = self.selector().to_vec();
        data.extend(DeployArg::encode_params(&self.args));
        data
    }
}

impl fmt::Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} with ({})",
            self.target,
            self.signature,
            format_args_list(&self.args)
        )
    }
}
