//! Contract and instance names of the ZNS deployment.

/// Storage key and registry key of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractNames {
    pub contract: &'static str,
    pub instance: &'static str,
}

pub const ACCESS_CONTROLLER: ContractNames = ContractNames {
    contract: "ZNSAccessController",
    instance: "accessController",
};

pub const REGISTRY: ContractNames = ContractNames {
    contract: "ZNSRegistry",
    instance: "registry",
};

pub const DOMAIN_TOKEN: ContractNames = ContractNames {
    contract: "ZNSDomainToken",
    instance: "domainToken",
};

pub const MEOW_TOKEN_MOCK: ContractNames = ContractNames {
    contract: "MeowTokenMock",
    instance: "meowToken",
};

pub const ADDRESS_RESOLVER: ContractNames = ContractNames {
    contract: "ZNSAddressResolver",
    instance: "addressResolver",
};

pub const CURVE_PRICER: ContractNames = ContractNames {
    contract: "ZNSCurvePricer",
    instance: "curvePricer",
};

pub const TREASURY: ContractNames = ContractNames {
    contract: "ZNSTreasury",
    instance: "treasury",
};

pub const ROOT_REGISTRAR: ContractNames = ContractNames {
    contract: "ZNSRootRegistrar",
    instance: "rootRegistrar",
};

pub const FIXED_PRICER: ContractNames = ContractNames {
    contract: "ZNSFixedPricer",
    instance: "fixedPricer",
};

pub const SUB_REGISTRAR: ContractNames = ContractNames {
    contract: "ZNSSubRegistrar",
    instance: "subRegistrar",
};

/// Proxy contract used for UUPS deployments.
pub const ERC1967_PROXY: &str = "ERC1967Proxy";
/// Proxy contract used for transparent deployments.
pub const TRANSPARENT_PROXY: &str = "TransparentUpgradeableProxy";
