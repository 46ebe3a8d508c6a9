//! Account management for the access-control gate: first-owner
//! registration, login/logout, and owner-managed cashier accounts.
//!
//! Credentials are opaque to the ledger; none of these operations write
//! audit entries (the audit vocabulary covers mutations only).

use sqlx::SqlitePool;

use crate::config::get_config;
use crate::errors::AppError;
use crate::models::user::{
    Actor, AuthUserData, CreateUserPayload, DbUser, LoginResult, Role, User,
};
use crate::validation;
use crate::AppState;

/// Display name fallback: the email local part.
fn friendly_name(name: &Option<String>, email: &str) -> String {
    match name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(existing.is_some())
}

async fn insert_user(
    pool: &SqlitePool,
    payload: &CreateUserPayload,
    role: Role,
) -> Result<User, AppError> {
    let config = get_config();
    validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password, config.security.min_password_length)?;

    let email = payload.email.trim().to_string();
    if email_taken(pool, &email).await? {
        return Err(AppError::InvalidInput("email already registered".into()));
    }

    let name = friendly_name(&payload.name, &email);
    let hashed = bcrypt::hash(&payload.password, config.security.bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;

    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, role, name) VALUES (?, ?, ?, ?)",
    )
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(&name)
    .execute(pool)
    .await;

    match result {
        Ok(res) => {
            let id = res.last_insert_rowid();
            let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(pool)
                .await?;
            Ok(User::from(user))
        }
        // Lost the race against a concurrent insert of the same email
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(AppError::InvalidInput("email already registered".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Register the first owner. Refused once any owner exists.
pub async fn register_owner(pool: &SqlitePool, payload: CreateUserPayload) -> Result<User, AppError> {
    let (owners,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'OWNER'")
        .fetch_one(pool)
        .await?;
    if owners > 0 {
        return Err(AppError::Conflict("an owner is already registered".into()));
    }

    insert_user(pool, &payload, Role::Owner).await
}

/// Create a cashier account (OWNER only).
pub async fn create_cashier(
    pool: &SqlitePool,
    actor: &Actor,
    payload: CreateUserPayload,
) -> Result<User, AppError> {
    crate::auth::guard::require_owner(actor)?;
    insert_user(pool, &payload, Role::Cashier).await
}

/// List cashier accounts, newest first (OWNER only).
pub async fn list_cashiers(pool: &SqlitePool, actor: &Actor) -> Result<Vec<User>, AppError> {
    crate::auth::guard::require_owner(actor)?;

    let users = sqlx::query_as::<_, DbUser>(
        "SELECT * FROM users WHERE role = 'CASHIER' ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users.into_iter().map(User::from).collect())
}

/// Verify credentials and open a session.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<LoginResult, AppError> {
    let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE email = ?")
        .bind(email.trim())
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("invalid credentials".into()))?;

    let valid = bcrypt::verify(password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::Unauthenticated("invalid credentials".into()));
    }

    let name = friendly_name(&user.name, &user.email);

    let token = state
        .sessions
        .lock()
        .map_err(|e| AppError::Internal(format!("session store poisoned: {}", e)))?
        .create(user.id, user.email.clone(), name.clone(), user.role);

    Ok(LoginResult {
        user: AuthUserData {
            id: user.id,
            email: user.email,
            role: user.role,
            name,
        },
        session_token: token,
        logged_in_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Drop the session for this token.
pub fn logout(state: &AppState, token: &str) -> Result<(), AppError> {
    state
        .sessions
        .lock()
        .map_err(|e| AppError::Internal(format!("session store poisoned: {}", e)))?
        .destroy(token);
    Ok(())
}
