//! Job and execution records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence label for a scheduled job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Runs every day.
    Daily,
    /// Runs once a week.
    Weekly,
    /// Runs once a month.
    Monthly,
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily
    }
}

impl Frequency {
    /// Stable label used for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }

    /// Parse a stored label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            _ => None,
        }
    }
}

/// A job-creation request.
///
/// Carries every [`Job`] field except the id, which the store generates
/// on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    /// Human-readable job name.
    pub jobname: String,
    /// Recurrence label.
    pub frequency: Frequency,
    /// Time of day the job should fire.
    pub schedule_time: NaiveTime,
    /// First day of the scheduling window.
    pub start_date: NaiveDate,
    /// Last day of the scheduling window.
    pub end_date: NaiveDate,
    /// Owner reference.
    pub user_id: i64,
}

impl NewJob {
    /// Create a new job request.
    pub fn new(
        jobname: impl Into<String>,
        frequency: Frequency,
        schedule_time: NaiveTime,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_id: i64,
    ) -> Self {
        Self {
            jobname: jobname.into(),
            frequency,
            schedule_time,
            start_date,
            end_date,
            user_id,
        }
    }
}

/// A persisted job record.
///
/// Created once, never mutated or deleted by the service core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Generated row id.
    pub id: i64,
    /// Human-readable job name.
    pub jobname: String,
    /// Recurrence label.
    pub frequency: Frequency,
    /// Time of day the job should fire.
    pub schedule_time: NaiveTime,
    /// First day of the scheduling window.
    pub start_date: NaiveDate,
    /// Last day of the scheduling window.
    pub end_date: NaiveDate,
    /// Owner reference.
    pub user_id: i64,
}

impl Job {
    /// Attach the generated id to a creation request.
    pub fn from_new(id: i64, new: NewJob) -> Self {
        Self {
            id,
            jobname: new.jobname,
            frequency: new.frequency,
            schedule_time: new.schedule_time,
            start_date: new.start_date,
            end_date: new.end_date,
            user_id: new.user_id,
        }
    }
}

/// Outcome of one execution of a job.
///
/// Written by the external executor; read-only for the service core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobExecution {
    /// The job this outcome belongs to.
    pub job_id: i64,
    /// Outcome label, e.g. "completed".
    pub status: String,
    /// Captured execution output.
    pub execution_log: String,
    /// When the execution started.
    pub start_time: DateTime<Utc>,
}
