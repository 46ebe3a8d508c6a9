use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

use super::migrations::run_migrations;
use crate::config::get_config;
use crate::errors::AppError;

/// Initialize the SQLite database and its connection pool.
///
/// - WAL mode for concurrent reads alongside a writer
/// - Foreign key enforcement (RESTRICT / SET NULL actions depend on it)
/// - Busy timeout so competing writers wait instead of failing immediately
pub async fn init_db(data_dir: &Path) -> Result<SqlitePool, AppError> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| AppError::Internal(format!("failed to create data dir: {}", e)))?;

    let config = get_config();
    let db_path = config.get_database_path(data_dir);
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(
            config.database.busy_timeout_secs,
        ));

    let pool_options = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.connect_timeout_secs,
        ))
        .idle_timeout(std::time::Duration::from_secs(
            config.database.idle_timeout_secs,
        ));

    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Health check for the database connection.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
