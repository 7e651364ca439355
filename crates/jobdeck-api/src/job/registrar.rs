//! Scheduler registration sink.
//!
//! Persisted jobs are handed to the registrar after their row is
//! committed. The default registrar derives a cron expression from the
//! job's recurrence, validates it, and retains the registration in
//! memory; execution itself happens outside this service.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Timelike, Utc};
use cron::Schedule;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use jobdeck_protocols::{Frequency, Job};

/// Registration errors.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Derived cron expression was rejected.
    #[error("Invalid schedule for job {job_id}: {reason}")]
    InvalidSchedule { job_id: i64, reason: String },

    /// The sink rejected the registration.
    #[error("Registration failed: {0}")]
    Rejected(String),
}

/// Scheduler registration sink invoked with a persisted job.
#[async_trait]
pub trait JobRegistrar: Send + Sync {
    /// Register a committed job with the scheduler.
    async fn add_job(&self, job: &Job) -> Result<(), RegistrarError>;
}

/// A registered schedule entry.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The registered job's id.
    pub job_id: i64,
    /// Derived cron expression.
    pub cron_expr: String,
    /// Next computed fire time.
    pub next_run: Option<DateTime<Utc>>,
}

/// Registrar that derives and validates a cron expression per job.
pub struct CronRegistrar {
    entries: RwLock<HashMap<i64, Registration>>,
}

impl CronRegistrar {
    /// Create a new registrar.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of registered jobs.
    pub async fn registered_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Look up a registration by job id.
    pub async fn registration(&self, job_id: i64) -> Option<Registration> {
        self.entries.read().await.get(&job_id).cloned()
    }

    /// Derive the cron expression for a job.
    ///
    /// Weekly jobs fire on the weekday of `start_date`; monthly jobs on
    /// its day of month.
    fn cron_expression(job: &Job) -> String {
        let minute = job.schedule_time.minute();
        let hour = job.schedule_time.hour();
        match job.frequency {
            Frequency::Daily => format!("0 {minute} {hour} * * *"),
            Frequency::Weekly => {
                format!("0 {minute} {hour} * * {}", job.start_date.weekday())
            }
            Frequency::Monthly => {
                format!("0 {minute} {hour} {} * *", job.start_date.day())
            }
        }
    }
}

impl Default for CronRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobRegistrar for CronRegistrar {
    async fn add_job(&self, job: &Job) -> Result<(), RegistrarError> {
        let cron_expr = Self::cron_expression(job);
        let schedule =
            Schedule::from_str(&cron_expr).map_err(|e| RegistrarError::InvalidSchedule {
                job_id: job.id,
                reason: e.to_string(),
            })?;
        let next_run = schedule.after(&Utc::now()).next();

        let mut entries = self.entries.write().await;
        entries.insert(
            job.id,
            Registration {
                job_id: job.id,
                cron_expr: cron_expr.clone(),
                next_run,
            },
        );

        info!(
            "Registered job '{}' (id: {}) with schedule '{}'",
            job.jobname, job.id, cron_expr
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "registrar_tests.rs"]
mod tests;
