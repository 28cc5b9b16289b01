//! Deployment record persistence collaborator.

use std::future::Future;

use anyhow::Result;

use crate::record::DeploymentRecord;

/// Keyed store of deployment records.
///
/// A present record is taken as proof that the component exists and is usable.
/// No transactional guarantee is expected across calls.
pub trait StorageAdapter: Send + Sync {
    fn get_record(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DeploymentRecord>>> + Send;

    /// Store `record` under `name`, replacing any previous record.
    fn put_record(
        &self,
        name: &str,
        record: DeploymentRecord,
    ) -> impl Future<Output = Result<()>> + Send;
}
