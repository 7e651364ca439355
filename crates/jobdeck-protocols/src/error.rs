//! Store errors.

use thiserror::Error;

/// Persistence error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open or reach the database.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement or transaction control call failed.
    #[error("Query error: {0}")]
    Query(String),

    /// `refresh` was called with no staged insert to read back.
    #[error("No staged insert to refresh")]
    NoStagedInsert,
}
