use thiserror::Error;

/// Error taxonomy for the ledger and its collaborators.
///
/// Callers may retry only where `is_retriable` says so; everything else is
/// terminal until the caller changes its input or resolves the conflict.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("insufficient stock for product {product_id}: {available} available, {requested} requested")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Transport status this error maps to at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Unauthenticated(_) => 401,
            AppError::Unauthorized(_) => 403,
            AppError::NotFound(_) => 404,
            AppError::InsufficientStock { .. } => 400,
            AppError::Conflict(_) => 409,
            AppError::Database(_) | AppError::Internal(_) => 500,
        }
    }

    /// Transient store failures (lock wait exhausted, connection dropped)
    /// may be retried by the caller. Terminal failures must not be.
    pub fn is_retriable(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => {
                // SQLITE_BUSY (5) / SQLITE_LOCKED (6), primary or extended
                let busy = matches!(
                    db.code().as_deref(),
                    Some("5" | "6" | "261" | "262" | "517" | "518" | "773")
                );
                busy || db.message().contains("database is locked")
            }
            AppError::Database(sqlx::Error::PoolTimedOut) => true,
            AppError::Database(sqlx::Error::Io(_)) => true,
            _ => false,
        }
    }

    /// Message safe to surface to callers. Internal failures are logged in
    /// full and reported generically.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                crate::log_error!("DATABASE", "operation failed", e.to_string());
                "internal error".to_string()
            }
            AppError::Internal(detail) => {
                crate::log_error!("INTERNAL", "operation failed", detail.clone());
                "internal error".to_string()
            }
            other => other.to_string(),
        }
    }
}
