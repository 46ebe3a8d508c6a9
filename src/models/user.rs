use serde::{Deserialize, Serialize};

/// Account role. Fixed at creation time; there is no promotion or demotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Cashier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Cashier => "CASHIER",
        }
    }
}

/// The authenticated identity performing an operation, as resolved by the
/// access-control gate. Ledger operations trust this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

/// Row struct straight from the database — for query_as.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: Option<String>,
    pub created_at: Option<String>,
}

/// User shape sent to callers (without password_hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub created_at: Option<String>,
}

impl From<DbUser> for User {
    fn from(u: DbUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role,
            name: u.name,
            created_at: u.created_at,
        }
    }
}

/// Successful login, handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub user: AuthUserData,
    pub session_token: String,
    pub logged_in_at: String,
}

/// User data inside LoginResult.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserData {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// Payload for registration and cashier creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserPayload {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}
