//! Persistence layer: pool construction, migrations, and the entry store.

pub mod error;
pub mod models;
pub mod repositories;

pub use error::EntryError;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool handle. Cheap to clone and passed explicitly to
/// every repository call; there is no process-global database state.
pub type DbPool = PgPool;

/// Embedded migrations, compiled in from `db/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../db/migrations");

/// Create a bounded connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations.
///
/// Idempotent: safe to call on every process start, and never touches
/// existing rows.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Drop all entry data and rebuild the schema from scratch.
///
/// Administrative only (test and seed workflows). The migration
/// bookkeeping table goes too, otherwise the migrator would consider the
/// schema current and skip recreating the dropped table.
pub async fn destructive_reset(pool: &DbPool) -> Result<(), EntryError> {
    tracing::warn!("destructive reset: dropping log_entries");
    sqlx::query("DROP TABLE IF EXISTS log_entries")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(pool)
        .await?;
    run_migrations(pool).await?;
    Ok(())
}
