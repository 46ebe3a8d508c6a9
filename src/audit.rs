//! Audit Recorder: append-only activity trail.
//!
//! `append` always runs on the caller's transaction connection, so the
//! audit entry commits or rolls back with the mutation it documents. There
//! is no detached or best-effort audit write anywhere in this crate.

use sqlx::{SqliteConnection, SqlitePool};

use crate::config::get_config;
use crate::errors::AppError;
use crate::models::activity::ActivityLogWithContext;
use crate::models::user::Actor;

/// The closed vocabulary of audited actions. The schema enforces the same
/// list with a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    ProductAdd,
    ProductUpdate,
    ProductDelete,
    SaleRecord,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ProductAdd => "PRODUCT_ADD",
            AuditAction::ProductUpdate => "PRODUCT_UPDATE",
            AuditAction::ProductDelete => "PRODUCT_DELETE",
            AuditAction::SaleRecord => "SALE_RECORD",
        }
    }
}

/// Append one audit entry on the caller's transaction connection.
///
/// Errors propagate so the enclosing transaction rolls back: a mutation
/// that cannot be audited must not commit.
pub async fn append(
    conn: &mut SqliteConnection,
    actor: &Actor,
    action: AuditAction,
    product_id: Option<i64>,
    details: &serde_json::Value,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO activity_logs (actor_id, actor_role, action, product_id, details)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(actor.id)
    .bind(actor.role)
    .bind(action)
    .bind(product_id)
    .bind(details.to_string())
    .execute(conn)
    .await?;

    Ok(())
}

/// List audit entries, most recent first (OWNER only).
///
/// The requested limit is clamped to the configured maximum regardless of
/// what the caller asks for.
pub async fn list(
    pool: &SqlitePool,
    actor: &Actor,
    limit: Option<i64>,
) -> Result<Vec<ActivityLogWithContext>, AppError> {
    crate::auth::guard::require_owner(actor)?;

    let limits = &get_config().limits;
    let n = limit.unwrap_or(limits.activity_default).clamp(1, limits.activity_max);

    let entries = sqlx::query_as::<_, ActivityLogWithContext>(
        r#"
        SELECT a.id,
               a.actor_id,
               COALESCE(u.email, '') AS actor_email,
               COALESCE(u.name, substr(u.email, 1, instr(u.email, '@') - 1), '') AS actor_name,
               a.actor_role,
               a.action,
               a.product_id,
               p.name AS product_name,
               a.details,
               a.created_at
        FROM activity_logs a
        LEFT JOIN users u ON u.id = a.actor_id
        LEFT JOIN products p ON p.id = a.product_id
        ORDER BY a.created_at DESC, a.id DESC
        LIMIT ?
        "#,
    )
    .bind(n)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
