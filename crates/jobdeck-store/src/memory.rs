//! In-memory job store for testing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use jobdeck_protocols::{Job, JobExecution, NewJob, StoreError};

use crate::store::JobStore;

#[derive(Default)]
struct Inner {
    jobs: BTreeMap<i64, Job>,
    executions: Vec<JobExecution>,
    staged: Option<NewJob>,
    last_committed: Option<i64>,
    next_id: i64,
}

/// In-memory job store for testing.
///
/// Mirrors the SQLite store's staging semantics: `insert` stages a row,
/// `commit` assigns the id and persists it, `rollback` discards the
/// staged row.
pub struct MemoryJobStore {
    inner: RwLock<Inner>,
}

impl MemoryJobStore {
    /// Create a new memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Record an execution outcome for a job.
    pub async fn record_execution(&self, execution: &JobExecution) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.executions.push(execution.clone());
        Ok(())
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, job: &NewJob) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.staged = Some(job.clone());
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(staged) = inner.staged.take() {
            inner.next_id += 1;
            let id = inner.next_id;
            inner.jobs.insert(id, Job::from_new(id, staged));
            inner.last_committed = Some(id);
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.staged = None;
        Ok(())
    }

    async fn refresh(&self) -> Result<Job, StoreError> {
        let inner = self.inner.read().await;
        let id = inner.last_committed.ok_or(StoreError::NoStagedInsert)?;
        inner
            .jobs
            .get(&id)
            .cloned()
            .ok_or(StoreError::NoStagedInsert)
    }

    async fn all_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.values().cloned().collect())
    }

    async fn job_by_id(&self, id: i64) -> Result<Option<Job>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn latest_execution(
        &self,
        job_id: i64,
    ) -> Result<Option<JobExecution>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .executions
            .iter()
            .filter(|e| e.job_id == job_id)
            .max_by_key(|e| e.start_time)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use jobdeck_protocols::Frequency;

    fn sample_request(name: &str) -> NewJob {
        NewJob::new(
            name,
            Frequency::Daily,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            1,
        )
    }

    #[tokio::test]
    async fn test_insert_commit_refresh() {
        let store = MemoryJobStore::new();
        store.insert(&sample_request("job-a")).await.unwrap();
        store.commit().await.unwrap();

        let job = store.refresh().await.unwrap();
        assert_eq!(job.id, 1);
        assert_eq!(job.jobname, "job-a");
    }

    #[tokio::test]
    async fn test_rollback_discards_staged_row() {
        let store = MemoryJobStore::new();
        store.insert(&sample_request("job-a")).await.unwrap();
        store.rollback().await.unwrap();
        store.commit().await.unwrap();

        assert!(store.all_jobs().await.unwrap().is_empty());
        assert!(matches!(
            store.refresh().await,
            Err(StoreError::NoStagedInsert)
        ));
    }

    #[tokio::test]
    async fn test_ids_increment_per_commit() {
        let store = MemoryJobStore::new();
        for name in ["first", "second", "third"] {
            store.insert(&sample_request(name)).await.unwrap();
            store.commit().await.unwrap();
        }

        let jobs = store.all_jobs().await.unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(
            jobs.iter().map(|j| j.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
