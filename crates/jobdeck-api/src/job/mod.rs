//! Job scheduling service module.
//!
//! CRUD operations over persisted job records, plus scheduler
//! registration after commit.

mod registrar;
mod response;
pub mod routes;
mod service;

pub use registrar::{CronRegistrar, JobRegistrar, RegistrarError, Registration};
pub use response::{JobDetailsResponse, ScheduledJobResponse, NO_LOGS, NO_STATUS};
pub use routes::JobListResponse;
pub use service::{fetch_job_details, fetch_scheduled_jobs, schedule_new_job};
