//! Error types shared by every backing store
//!
//! Repositories in the service crates report failures through
//! [`DatabaseError`] so the HTTP layer can turn any of them into a
//! server-side failure without knowing which store produced it.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Failure raised by a backing store
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be reached
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement failed while executing
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema bootstrap failed
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration could not be turned into a connection
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A uniqueness constraint rejected the write
    #[error("Database conflict: {0}")]
    Conflict(String),
}

impl DatabaseError {
    /// Classify a query failure, separating unique-key violations from the rest
    pub fn from_query(error: SqlxError) -> Self {
        let is_unique_violation = error
            .as_database_error()
            .is_some_and(|db_error| db_error.is_unique_violation());

        if is_unique_violation {
            DatabaseError::Conflict(error.to_string())
        } else {
            DatabaseError::Query(error)
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
