//! # Schema Migrations
//!
//! SQL files under `migrations/sqlite/` are compiled into the binary and
//! applied in order when the database opens. sqlx records each applied file
//! in `_sqlx_migrations`, so reopening an up-to-date file is a no-op.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_local_storage.sql   local_storage(key, value, updated_at)
//! ```
//!
//! Applied files are immutable; schema changes go in a new `NNN_*.sql`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration the database has not seen yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    debug!(count = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((
        MIGRATOR.migrations.len(),
        usize::try_from(applied).unwrap_or(0),
    ))
}
