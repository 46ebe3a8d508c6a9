use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Immutable audit fact. `actor_role` is denormalized at write time so the
/// entry stays truthful if roles ever change; `product_id` outlives product
/// deletion by becoming NULL.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub actor_id: i64,
    pub actor_role: Role,
    pub action: String,
    pub product_id: Option<i64>,
    pub details: String,
    pub created_at: Option<String>,
}

/// Audit entry with actor and product context (JOIN result).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLogWithContext {
    pub id: i64,
    pub actor_id: i64,
    pub actor_email: String,
    pub actor_name: String,
    pub actor_role: Role,
    pub action: String,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub details: String,
    pub created_at: Option<String>,
}
