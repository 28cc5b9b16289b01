//! In-process storage adapter.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use anyhow::Result;

use crate::{record::DeploymentRecord, traits::StorageAdapter};

/// Keeps records in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStorageAdapter {
    records: Mutex<BTreeMap<String, DeploymentRecord>>,
}

impl MemoryStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<String, DeploymentRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the record of `name`, as an operator would to force a redeploy.
    pub fn remove_record(&self, name: &str) -> Option<DeploymentRecord> {
        self.records().remove(name)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Names of every stored component, sorted.
    pub fn names(&self) -> Vec<String> {
        self.records().keys().cloned().collect()
    }
}

impl StorageAdapter for MemoryStorageAdapter {
    async fn get_record(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        Ok(self.records().get(name).cloned())
    }

    async fn put_record(&self, name: &str, record: DeploymentRecord) -> Result<()> {
        self.records().insert(name.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_core::primitives::{Address, Bytes};

    use super::*;

    fn record(name: &str, byte: u8) -> DeploymentRecord {
        DeploymentRecord {
            name: name.to_string(),
            address: Address::repeat_byte(byte),
            abi: "[]".to_string(),
            bytecode: Bytes::new(),
            implementation: None,
            version: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn put_replaces_previous_record() {
        let storage = MemoryStorageAdapter::new();
        storage.put_record("ZNSRegistry", record("ZNSRegistry", 1)).await.unwrap();
        storage.put_record("ZNSRegistry", record("ZNSRegistry", 2)).await.unwrap();

        let stored = storage.get_record("ZNSRegistry").await.unwrap().unwrap();
        assert_eq!(stored.address, Address::repeat_byte(2));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn removed_record_reads_as_absent() {
        let storage = MemoryStorageAdapter::new();
        storage.put_record("ZNSTreasury", record("ZNSTreasury", 1)).await.unwrap();

        assert!(storage.remove_record("ZNSTreasury").is_some());
        assert!(storage.get_record("ZNSTreasury").await.unwrap().is_none());
        assert!(storage.is_empty());
    }
}
