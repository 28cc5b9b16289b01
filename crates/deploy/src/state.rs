//! In-memory registry of contracts deployed (or found) during a campaign.

use std::collections::{BTreeMap, HashMap};

use alloy_core::primitives::Address;

use crate::{contract::ContractHandle, error::CampaignError};

/// Maps instance names to live contract handles.
///
/// Entries only accumulate; iteration follows insertion order, which is the
/// order in which missions completed.
#[derive(Debug, Clone, Default)]
pub struct ContractState {
    order: Vec<String>,
    contracts: HashMap<String, ContractHandle>,
}

impl ContractState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, instance: &str) -> Option<&ContractHandle> {
        self.contracts.get(instance)
    }

    /// Like [`Self::get`], but a missing entry is an error.
    pub fn require(&self, instance: &str) -> Result<&ContractHandle, CampaignError> {
        self.get(instance)
            .ok_or_else(|| CampaignError::MissingContract {
                instance: instance.to_string(),
            })
    }

    pub fn address(&self, instance: &str) -> Result<Address, CampaignError> {
        self.require(instance).map(|handle| handle.address)
    }

    pub fn contains(&self, instance: &str) -> bool {
        self.contracts.contains_key(instance)
    }

    /// Insert or overwrite the entry for `instance`.
    pub fn set(&mut self, instance: impl Into<String>, handle: ContractHandle) {
        let instance = instance.into();
        if !self.contracts.contains_key(&instance) {
            self.order.push(instance.clone());
        }
        self.contracts.insert(instance, handle);
    }

    /// Register the output of a mission after checking the handle is usable.
    pub fn update(
        &mut self,
        instance: &str,
        contract_name: &str,
        handle: ContractHandle,
    ) -> Result<(), CampaignError> {
        let malformed = |reason: String| CampaignError::MalformedHandle {
            instance: instance.to_string(),
            reason,
        };

        if handle.address == Address::ZERO {
            return Err(malformed("handle points at the zero address".to_string()));
        }
        if handle.name != contract_name {
            return Err(malformed(format!(
                "handle is for {} but the mission deploys {contract_name}",
                handle.name
            )));
        }

        tracing::debug!(
            instance,
            contract = contract_name,
            address = %handle.address,
            "Updating contract state"
        );
        self.set(instance, handle);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContractHandle)> {
        self.order
            .iter()
            .filter_map(|name| self.contracts.get(name).map(|handle| (name.as_str(), handle)))
    }

    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Instance name to address, handy for comparing two runs.
    pub fn addresses(&self) -> BTreeMap<String, Address> {
        self.contracts
            .iter()
            .map(|(name, handle)| (name.clone(), handle.address))
            .collect()
    }
}
