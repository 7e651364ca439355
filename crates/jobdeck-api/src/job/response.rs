//! Outward-facing response records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use jobdeck_protocols::{Frequency, Job, JobExecution};

/// Placeholder status shown when a job has no recorded execution.
pub const NO_STATUS: &str = "No status available";

/// Placeholder log shown when a job has no recorded execution.
pub const NO_LOGS: &str = "No logs available";

/// Outward shape of a persisted job.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledJobResponse {
    pub id: i64,
    pub jobname: String,
    pub frequency: Frequency,
    pub schedule_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_id: i64,
}

impl From<&Job> for ScheduledJobResponse {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            jobname: job.jobname.clone(),
            frequency: job.frequency,
            schedule_time: job.schedule_time,
            start_date: job.start_date,
            end_date: job.end_date,
            user_id: job.user_id,
        }
    }
}

/// Job detail view joined with the latest execution outcome.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetailsResponse {
    pub id: i64,
    pub jobname: String,
    pub status: String,
    pub execution_log: String,
    pub start_time: Option<DateTime<Utc>>,
}

impl JobDetailsResponse {
    /// Join a job with its latest execution, substituting placeholders
    /// when none exists.
    pub fn assemble(job: &Job, execution: Option<JobExecution>) -> Self {
        match execution {
            Some(execution) => Self {
                id: job.id,
                jobname: job.jobname.clone(),
                status: execution.status,
                execution_log: execution.execution_log,
                start_time: Some(execution.start_time),
            },
            None => Self {
                id: job.id,
                jobname: job.jobname.clone(),
                status: NO_STATUS.to_string(),
                execution_log: NO_LOGS.to_string(),
                start_time: None,
            },
        }
    }
}
