//! Job HTTP route handlers.
//!
//! Provides the CRUD surface for scheduled jobs:
//! - POST   /jobs       - Schedule a new job
//! - GET    /jobs       - List scheduled jobs
//! - GET    /jobs/{id}  - Job details with latest execution status

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use jobdeck_protocols::NewJob;

use super::response::{JobDetailsResponse, ScheduledJobResponse};
use super::service;
use crate::error::ServiceError;
use crate::state::AppState;

/// Response for listing jobs.
#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub count: usize,
    pub jobs: Vec<ScheduledJobResponse>,
}

/// Schedule a new job.
///
/// POST /jobs
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<ScheduledJobResponse>), ServiceError> {
    info!(
        "Scheduling job: {} ({})",
        request.jobname,
        request.frequency.as_str()
    );

    let response =
        service::schedule_new_job(request, state.store.as_ref(), state.registrar.as_ref())
            .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all scheduled jobs.
///
/// GET /jobs
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JobListResponse>, ServiceError> {
    let jobs = service::fetch_scheduled_jobs(state.store.as_ref()).await?;
    Ok(Json(JobListResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// Get a job's details by id.
///
/// GET /jobs/{id}
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<JobDetailsResponse>, ServiceError> {
    let details = service::fetch_job_details(id, state.store.as_ref()).await?;
    Ok(Json(details))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
