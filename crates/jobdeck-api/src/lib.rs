//! # Jobdeck API
//!
//! Service operations and HTTP surface for the jobdeck service.
//!
//! The job module holds the three service operations (schedule, list,
//! details) built on the [`jobdeck_store::JobStore`] contract; route
//! handlers translate their outcomes into HTTP responses. Scheduler
//! registration happens after a job row is committed and is tracked by
//! the [`job::CronRegistrar`].

pub mod error;
pub mod job;
pub mod server;
pub mod state;

pub use error::ServiceError;
pub use job::{
    CronRegistrar, JobDetailsResponse, JobRegistrar, RegistrarError, ScheduledJobResponse,
};
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
