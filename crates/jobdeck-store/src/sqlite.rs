//! SQLite-backed job store.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::params;
use tokio::sync::Mutex;
use tokio_rusqlite::Connection;
use tracing::debug;

use jobdeck_protocols::{Frequency, Job, JobExecution, NewJob, StoreError};

use crate::schema::init_schema;
use crate::store::JobStore;

const TIME_FORMAT: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

const JOB_COLUMNS: &str = "id, jobname, frequency, schedule_time, start_date, end_date, user_id";

/// SQLite-based job store.
///
/// Writes go through an explicit transaction: `insert` opens one and
/// stages the row, `commit`/`rollback` close it, and `refresh` reads the
/// staged row back by its generated rowid.
pub struct SqliteJobStore {
    conn: Connection,
    staged: Mutex<Option<i64>>,
}

impl SqliteJobStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self {
            conn,
            staged: Mutex::new(None),
        })
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.call(|conn| {
            // WAL mode for concurrent readers.
            conn.pragma_update(None, "journal_mode", "WAL")?;
            init_schema(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self {
            conn,
            staged: Mutex::new(None),
        })
    }

    /// Record an execution outcome for a job.
    ///
    /// Execution rows are written by the executor side of the system; the
    /// service core only reads them.
    pub async fn record_execution(&self, execution: &JobExecution) -> Result<(), StoreError> {
        let execution = execution.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO job_executions (job_id, status, execution_log, start_time)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        execution.job_id,
                        execution.status,
                        execution.execution_log,
                        execution.start_time.to_rfc3339()
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn insert(&self, job: &NewJob) -> Result<(), StoreError> {
        let job = job.clone();
        let rowid = self
            .conn
            .call(move |conn| {
                conn.execute_batch("BEGIN")?;
                conn.execute(
                    "INSERT INTO jobs (jobname, frequency, schedule_time, start_date, end_date, user_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        job.jobname,
                        job.frequency.as_str(),
                        job.schedule_time.format(TIME_FORMAT).to_string(),
                        job.start_date.format(DATE_FORMAT).to_string(),
                        job.end_date.format(DATE_FORMAT).to_string(),
                        job.user_id
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        *self.staged.lock().await = Some(rowid);
        debug!("Staged job row {}", rowid);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("COMMIT")?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        self.staged.lock().await.take();
        self.conn
            .call(|conn| {
                // No-op outside an active transaction.
                if !conn.is_autocommit() {
                    conn.execute_batch("ROLLBACK")?;
                }
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn refresh(&self) -> Result<Job, StoreError> {
        let Some(rowid) = *self.staged.lock().await else {
            return Err(StoreError::NoStagedInsert);
        };

        self.conn
            .call(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"))?;
                let job = stmt.query_row([rowid], job_from_row)?;
                Ok(job)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn all_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id"))?;
                let jobs = stmt
                    .query_map([], job_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(jobs)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn job_by_id(&self, id: i64) -> Result<Option<Job>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"))?;
                match stmt.query_row([id], job_from_row) {
                    Ok(job) => Ok(Some(job)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn latest_execution(
        &self,
        job_id: i64,
    ) -> Result<Option<JobExecution>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT job_id, status, execution_log, start_time
                     FROM job_executions WHERE job_id = ?1
                     ORDER BY start_time DESC LIMIT 1",
                )?;
                match stmt.query_row([job_id], execution_from_row) {
                    Ok(execution) => Ok(Some(execution)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}

fn job_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    let frequency_label: String = row.get(2)?;
    let schedule_time: String = row.get(3)?;
    let start_date: String = row.get(4)?;
    let end_date: String = row.get(5)?;

    let frequency = Frequency::parse(&frequency_label).ok_or_else(|| {
        bad_column(2, format!("unknown frequency label '{frequency_label}'"))
    })?;
    let schedule_time = NaiveTime::parse_from_str(&schedule_time, TIME_FORMAT)
        .map_err(|e| bad_column(3, e.to_string()))?;
    let start_date = NaiveDate::parse_from_str(&start_date, DATE_FORMAT)
        .map_err(|e| bad_column(4, e.to_string()))?;
    let end_date = NaiveDate::parse_from_str(&end_date, DATE_FORMAT)
        .map_err(|e| bad_column(5, e.to_string()))?;

    Ok(Job {
        id: row.get(0)?,
        jobname: row.get(1)?,
        frequency,
        schedule_time,
        start_date,
        end_date,
        user_id: row.get(6)?,
    })
}

fn execution_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JobExecution> {
    let start_time: String = row.get(3)?;
    let start_time = DateTime::parse_from_rfc3339(&start_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| bad_column(3, e.to_string()))?;

    Ok(JobExecution {
        job_id: row.get(0)?,
        status: row.get(1)?,
        execution_log: row.get(2)?,
        start_time,
    })
}

fn bad_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, message.into())
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
