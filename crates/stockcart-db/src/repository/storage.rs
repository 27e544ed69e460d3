//! # Local Storage Repository
//!
//! String keys to string values, persisted across restarts.
//!
//! ## Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation          SQL                               Result            │
//! │  ─────────          ───                               ──────            │
//! │  get(key)           SELECT value WHERE key = ?        Option<String>    │
//! │  set(key, value)    INSERT ... ON CONFLICT UPDATE     () (last wins)    │
//! │  remove(key)        DELETE WHERE key = ?              bool (existed)    │
//! │  keys()             SELECT key ORDER BY key           Vec<String>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `set` replaces the whole value; there is no partial update.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `local_storage` table.
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
}

impl LocalStorageRepository {
    /// Creates a new LocalStorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocalStorageRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Storage read");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Storage write");
        Ok(())
    }

    /// Deletes `key`. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every stored key in lexical order.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    /// Returns when `key` was last written.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at = sqlx::query_scalar("SELECT updated_at FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated_at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
