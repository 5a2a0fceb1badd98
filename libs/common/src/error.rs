//! Shared error types for the infrastructure layer

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors raised by the PostgreSQL layer backing the event log
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while establishing the connection pool
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred while executing a query
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred while ensuring the event log schema
    #[error("Database schema error: {0}")]
    Schema(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
