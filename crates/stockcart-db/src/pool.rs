//! # Database Pool Management
//!
//! Opens the local storage file and hands out repositories over it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Opening Local Storage                              │
//! │                                                                         │
//! │  DbConfig::new(path)          DbConfig::in_memory()                    │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  DbLocation::File             DbLocation::Memory                       │
//! │   WAL, synchronous=NORMAL      one pinned connection                   │
//! │   create if missing            (each :memory: connection is its own    │
//! │       │                         private database)                      │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │        SqlitePool ──► migrations ──► Database                          │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                          db.storage() ──► LocalStorageRepository        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A CLI run makes a handful of statements and exits, so the pool is small
//! and connections are not recycled.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::storage::LocalStorageRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A file on disk. Created on first open; its directory must exist.
    File(PathBuf),

    /// Process-private, gone when the pool closes.
    Memory,
}

/// Database configuration. Fields are public; adjust them after `new`.
///
/// ```rust,ignore
/// let db = Database::new(DbConfig::new(data_dir.join("stockcart.db"))).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Upper bound on open connections. Memory databases always use one.
    pub max_connections: u32,

    /// How long to wait for a free connection, and for SQLite's file lock.
    pub busy_timeout: Duration,

    /// Apply pending migrations on open.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 2,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// The file path, if this is a file database.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            DbLocation::File(path) => Some(path),
            DbLocation::Memory => None,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == DbLocation::Memory
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                // Readers don't block the writer
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true),
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::Open(e.to_string()))?,
        };

        Ok(options.busy_timeout(self.busy_timeout))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let max = if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        };

        SqlitePoolOptions::new()
            .max_connections(max)
            .acquire_timeout(self.busy_timeout)
            // Dropping the only connection of a memory database drops its data
            .idle_timeout(None)
            .max_lifetime(None)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the local storage database.
///
/// Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and brings its schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        match config.path() {
            Some(path) => info!(path = %path.display(), "Opening local storage"),
            None => info!("Opening in-memory local storage"),
        }

        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::Open(e.to_string()))?;

        debug!(max_connections = pool.options().get_max_connections(), "Pool ready");

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the key-value repository.
    pub fn storage(&self) -> LocalStorageRepository {
        LocalStorageRepository::new(self.pool.clone())
    }

    /// Closes the pool. Repositories handed out earlier start failing with
    /// [`DbError::Closed`].
    pub async fn close(&self) {
        debug!("Closing local storage");
        self.pool.close().await;
    }

    /// Checks that a statement can still run.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
