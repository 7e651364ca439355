
use super::*;
use chrono::{TimeZone, Timelike};
use tempfile::TempDir;

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

fn execution_at(job_id: i64, status: &str, hour: u32) -> JobExecution {
    JobExecution {
        job_id,
        status: status.to_string(),
        execution_log: format!("run at {hour}:00"),
        start_time: Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_insert_commit_refresh_round_trip() {
    let store = SqliteJobStore::in_memory().await.unwrap();

    store.insert(&sample_request("nightly-report")).await.unwrap();
    store.commit().await.unwrap();
    let job = store.refresh().await.unwrap();

    assert_eq!(job.id, 1);
    assert_eq!(job.jobname, "nightly-report");
    assert_eq!(job.frequency, Frequency::Daily);
    assert_eq!(job.schedule_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(job.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(job.user_id, 1);
}

#[tokio::test]
async fn test_rollback_discards_staged_row() {
    let store = SqliteJobStore::in_memory().await.unwrap();

    store.insert(&sample_request("doomed")).await.unwrap();
    store.rollback().await.unwrap();

    assert!(store.all_jobs().await.unwrap().is_empty());
    assert!(matches!(
        store.refresh().await,
        Err(StoreError::NoStagedInsert)
    ));
}

#[tokio::test]
async fn test_rollback_without_transaction_is_a_no_op() {
    let store = SqliteJobStore::in_memory().await.unwrap();

    store.insert(&sample_request("kept")).await.unwrap();
    store.commit().await.unwrap();

    // After commit there is no active transaction to revert.
    store.rollback().await.unwrap();
    assert_eq!(store.all_jobs().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_refresh_without_insert() {
    let store = SqliteJobStore::in_memory().await.unwrap();
    assert!(matches!(
        store.refresh().await,
        Err(StoreError::NoStagedInsert)
    ));
}

#[tokio::test]
async fn test_job_by_id_absent_is_none() {
    let store = SqliteJobStore::in_memory().await.unwrap();
    assert!(store.job_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_all_jobs_in_id_order() {
    let store = SqliteJobStore::in_memory().await.unwrap();

    for name in ["first", "second", "third"] {
        store.insert(&sample_request(name)).await.unwrap();
        store.commit().await.unwrap();
    }

    let jobs = store.all_jobs().await.unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(
        jobs.iter().map(|j| j.jobname.as_str()).collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert_eq!(jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_latest_execution_picks_greatest_start_time() {
    let store = SqliteJobStore::in_memory().await.unwrap();
    store.insert(&sample_request("tracked")).await.unwrap();
    store.commit().await.unwrap();
    let job = store.refresh().await.unwrap();

    // Recorded out of order on purpose.
    store.record_execution(&execution_at(job.id, "failed", 12)).await.unwrap();
    store.record_execution(&execution_at(job.id, "completed", 18)).await.unwrap();
    store.record_execution(&execution_at(job.id, "completed", 9)).await.unwrap();

    let latest = store.latest_execution(job.id).await.unwrap().unwrap();
    assert_eq!(latest.status, "completed");
    assert_eq!(latest.start_time.hour(), 18);
}

#[tokio::test]
async fn test_latest_execution_none_without_rows() {
    let store = SqliteJobStore::in_memory().await.unwrap();
    store.insert(&sample_request("quiet")).await.unwrap();
    store.commit().await.unwrap();
    let job = store.refresh().await.unwrap();

    assert!(store.latest_execution(job.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("jobs.db");

    {
        let store = SqliteJobStore::open(&db_path).await.unwrap();
        store.insert(&sample_request("durable")).await.unwrap();
        store.commit().await.unwrap();
    }

    let store = SqliteJobStore::open(&db_path).await.unwrap();
    let jobs = store.all_jobs().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].jobname, "durable");
}
