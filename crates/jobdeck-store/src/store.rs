//! Job persistence contract.

use async_trait::async_trait;

use jobdeck_protocols::{Job, JobExecution, NewJob, StoreError};

/// Unit-of-work style persistence handle for job records.
///
/// Write flow: [`insert`](JobStore::insert) stages a row in the active
/// transaction, [`commit`](JobStore::commit) persists it, and
/// [`refresh`](JobStore::refresh) reads it back with generated fields
/// populated. After a failure the caller must invoke
/// [`rollback`](JobStore::rollback); rollback outside an active
/// transaction is a no-op.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Stage a new job row.
    async fn insert(&self, job: &NewJob) -> Result<(), StoreError>;

    /// Durably persist staged changes.
    async fn commit(&self) -> Result<(), StoreError>;

    /// Revert the active transaction.
    async fn rollback(&self) -> Result<(), StoreError>;

    /// Read back the most recently committed job with its generated id.
    async fn refresh(&self) -> Result<Job, StoreError>;

    /// Load every job row, in store order.
    async fn all_jobs(&self) -> Result<Vec<Job>, StoreError>;

    /// Look up a job by id.
    async fn job_by_id(&self, id: i64) -> Result<Option<Job>, StoreError>;

    /// Latest execution record for a job, if any.
    ///
    /// "Latest" is the row with the greatest `start_time`.
    async fn latest_execution(&self, job_id: i64)
        -> Result<Option<JobExecution>, StoreError>;
}
