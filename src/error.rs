//! Error types for lite-orm.
//!
//! All fallible operations return [`OrmError`]. Variants carry enough context
//! for the caller to tell a connection problem apart from a rejected statement,
//! a usage error, or a partially failed batch.

use crate::config::DEFAULT_ACQUIRE_TIMEOUT_SECS;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrmError {
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// e.g., "23000" for an integrity constraint violation
        sql_state: Option<String>,
        suggestion: String,
    },

    #[error("Timeout: {operation} exceeded {elapsed_secs}s")]
    Timeout {
        operation: String,
        elapsed_secs: u32,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Record shape mismatch at row {row}: expected {expected} fields, got {actual}")]
    Shape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Database '{name}' is not registered")]
    DatabaseNotFound { name: String },

    #[error(
        "Batch insert failed in {failed_chunks} of {total_chunks} chunks ({rows_affected} rows inserted by the other chunks): {source}"
    )]
    Batch {
        failed_chunks: usize,
        total_chunks: usize,
        rows_affected: u64,
        #[source]
        source: Box<OrmError>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OrmError {
    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(
        message: impl Into<String>,
        sql_state: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
            suggestion: suggestion.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, elapsed_secs: u32) -> Self {
        Self::Timeout {
            operation: operation.into(),
            elapsed_secs,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn shape(row: usize, expected: usize, actual: usize) -> Self {
        Self::Shape {
            row,
            expected,
            actual,
        }
    }

    pub fn database_not_found(name: impl Into<String>) -> Self {
        Self::DatabaseNotFound { name: name.into() }
    }

    /// Wrap the first chunk failure of a batch together with the partial total.
    pub fn batch(
        failed_chunks: usize,
        total_chunks: usize,
        rows_affected: u64,
        source: OrmError,
    ) -> Self {
        Self::Batch {
            failed_chunks,
            total_chunks,
            rows_affected,
            source: Box::new(source),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Database { suggestion, .. } => Some(suggestion),
            Self::Batch { source, .. } => source.suggestion(),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } | Self::Timeout { .. } => true,
            Self::Batch { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Rows that were inserted despite the error (non-zero only for partial batches).
    pub fn rows_affected(&self) -> u64 {
        match self {
            Self::Batch { rows_affected, .. } => *rows_affected,
            _ => 0,
        }
    }
}

/// Convert sqlx errors to OrmError.
impl From<sqlx::Error> for OrmError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => OrmError::connection(
                msg.to_string(),
                "Check the connection settings and credentials",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                OrmError::database(
                    db_err.message(),
                    code,
                    "Check the statement, the target table and its constraints",
                )
            }
            sqlx::Error::PoolTimedOut => OrmError::timeout(
                "connection pool acquire",
                DEFAULT_ACQUIRE_TIMEOUT_SECS as u32,
            ),
            sqlx::Error::PoolClosed => {
                OrmError::connection("Connection pool is closed", "Register the database again")
            }
            sqlx::Error::Io(io_err) => OrmError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and database server status",
            ),
            sqlx::Error::Tls(tls_err) => OrmError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Protocol(msg) => OrmError::connection(
                format!("Protocol error: {}", msg),
                "Check database server compatibility",
            ),
            sqlx::Error::Encode(source) => {
                OrmError::invalid_input(format!("Failed to encode parameter: {}", source))
            }
            sqlx::Error::WorkerCrashed => OrmError::internal("Database worker crashed"),
            _ => OrmError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for ORM operations.
pub type OrmResult<T> = Result<T, OrmError>;
