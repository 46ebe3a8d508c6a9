pub mod audit;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod ledger;
pub mod logger;
pub mod models;
pub mod reports;
pub mod validation;

use std::path::Path;
use std::sync::Mutex;

use auth::session::SessionStore;
use errors::AppError;

/// Process-wide state: the store handle and the gate's session store.
///
/// The pool is created here and passed explicitly to every operation —
/// there is no module-level connection state anywhere in the crate.
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub sessions: Mutex<SessionStore>,
}

/// Wire up configuration, logging and the database, in that order.
/// `data_dir` holds the SQLite file and the log directory.
pub async fn bootstrap(data_dir: &Path) -> Result<AppState, AppError> {
    let config = config::init_config();

    if let Err(e) = logger::init_global_logger(data_dir, config.logging.clone()) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }

    log_info!("APP", "Application starting", serde_json::json!({
        "version": config.version,
        "environment": config.environment.as_str(),
        "data_dir": data_dir.to_string_lossy(),
    }));

    let pool = database::connection::init_db(data_dir).await?;

    log_info!("DATABASE", "Connection pool initialized", serde_json::json!({
        "pool_size": pool.size(),
    }));

    Ok(AppState {
        db: pool,
        sessions: Mutex::new(SessionStore::new()),
    })
}
