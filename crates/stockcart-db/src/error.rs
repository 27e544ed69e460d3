//! # Database Error Types
//!
//! Failures of the local storage file.
//!
//! ```text
//! sqlx::Error / MigrateError ──► DbError ──► StorageError (apps/cli)
//!                                                 │
//!                                                 └─► logged, cart kept in memory
//! ```

use thiserror::Error;

/// Local storage errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The SQLite file could not be opened or created.
    ///
    /// Usually a missing parent directory, a permissions problem or a
    /// full disk.
    #[error("Cannot open local storage: {0}")]
    Open(String),

    /// The schema could not be brought up to date.
    #[error("Schema migration failed: {0}")]
    Migration(String),

    /// SQLite rejected a statement.
    #[error("Storage statement failed: {0}")]
    Statement(String),

    /// Another process holds the file, or no connection freed up in time.
    #[error("Local storage is busy")]
    Busy,

    /// The handle was closed.
    #[error("Local storage is closed")]
    Closed,

    #[error("Local storage error: {0}")]
    Internal(String),
}

/// ```text
/// sqlx::Error::Database (SQLITE_BUSY) → DbError::Busy
/// sqlx::Error::Database (other)       → DbError::Statement
/// sqlx::Error::PoolTimedOut           → DbError::Busy
/// sqlx::Error::PoolClosed             → DbError::Closed
/// sqlx::Error::Io                     → DbError::Open
/// other                               → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // SQLITE_BUSY = 5
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("5") => DbError::Busy,
            sqlx::Error::Database(db_err) => DbError::Statement(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::Busy,
            sqlx::Error::PoolClosed => DbError::Closed,
            sqlx::Error::Io(e) => DbError::Open(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

/// Result type for local storage operations.
pub type DbResult<T> = Result<T, DbError>;
