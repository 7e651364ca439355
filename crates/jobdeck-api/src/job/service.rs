//! Job service operations.
//!
//! The three operations wrap store calls with rollback-on-failure and
//! translate every failure into one of the two caller-facing conditions
//! in [`ServiceError`].

use tracing::{error, info};

use jobdeck_protocols::NewJob;
use jobdeck_store::JobStore;

use super::registrar::JobRegistrar;
use super::response::{JobDetailsResponse, ScheduledJobResponse};
use crate::error::ServiceError;

/// Persist a new job and register it with the scheduler.
///
/// The store sees exactly one insert, one commit, and one refresh, in
/// that order; the registrar is invoked only after a successful commit.
/// On any failure the active transaction is rolled back once and the
/// caller receives [`ServiceError::Internal`]. A failure of the rollback
/// itself is logged and never masks the original failure.
pub async fn schedule_new_job(
    request: NewJob,
    store: &dyn JobStore,
    registrar: &dyn JobRegistrar,
) -> Result<ScheduledJobResponse, ServiceError> {
    match try_schedule(request, store, registrar).await {
        Ok(response) => Ok(response),
        Err(cause) => {
            error!("Failed to schedule job: {}", cause);
            if let Err(rollback_err) = store.rollback().await {
                error!("Rollback failed after scheduling error: {}", rollback_err);
            }
            Err(ServiceError::Internal)
        }
    }
}

async fn try_schedule(
    request: NewJob,
    store: &dyn JobStore,
    registrar: &dyn JobRegistrar,
) -> Result<ScheduledJobResponse, Box<dyn std::error::Error + Send + Sync>> {
    store.insert(&request).await?;
    store.commit().await?;
    let job = store.refresh().await?;
    registrar.add_job(&job).await?;

    info!("Scheduled job '{}' (id: {})", job.jobname, job.id);
    Ok(ScheduledJobResponse::from(&job))
}

/// List every scheduled job, preserving store order.
pub async fn fetch_scheduled_jobs(
    store: &dyn JobStore,
) -> Result<Vec<ScheduledJobResponse>, ServiceError> {
    let jobs = store.all_jobs().await.map_err(|e| {
        error!("Failed to fetch scheduled jobs: {}", e);
        ServiceError::Internal
    })?;

    Ok(jobs.iter().map(ScheduledJobResponse::from).collect())
}

/// Fetch one job joined with its latest execution outcome.
///
/// A missing job id is a normal outcome and maps to
/// [`ServiceError::JobNotFound`]; unexpected store failures map to
/// [`ServiceError::Internal`].
pub async fn fetch_job_details(
    job_id: i64,
    store: &dyn JobStore,
) -> Result<JobDetailsResponse, ServiceError> {
    let job = store
        .job_by_id(job_id)
        .await
        .map_err(|e| {
            error!("Failed to look up job {}: {}", job_id, e);
            ServiceError::Internal
        })?
        .ok_or(ServiceError::JobNotFound(job_id))?;

    let execution = store.latest_execution(job_id).await.map_err(|e| {
        error!("Failed to load execution status for job {}: {}", job_id, e);
        ServiceError::Internal
    })?;

    info!("Fetched details for job '{}' (id: {})", job.jobname, job.id);
    Ok(JobDetailsResponse::assemble(&job, execution))
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
