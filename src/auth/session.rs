use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::get_config;
use crate::models::user::{Actor, Role};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

/// In-memory bearer-token store. Tokens are opaque UUIDs; everything the
/// gate hands to the ledger comes from here.
pub struct SessionStore {
    sessions: HashMap<String, SessionData>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Create a new session and return its token (UUID v4).
    pub fn create(&mut self, user_id: i64, email: String, name: String, role: Role) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let ttl = Duration::minutes(get_config().security.session_timeout_mins);
        self.sessions.insert(
            token.clone(),
            SessionData {
                user_id,
                email,
                name,
                role,
                logged_in_at: now,
                expires_at: now + ttl,
            },
        );
        token
    }

    /// Validate a session token — present and not expired.
    pub fn validate(&self, token: &str) -> Option<&SessionData> {
        match self.sessions.get(token) {
            Some(s) if Utc::now() <= s.expires_at => Some(s),
            _ => None,
        }
    }

    /// Drop a session (logout).
    pub fn destroy(&mut self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::init_config;

    #[test]
    fn created_sessions_validate_and_destroy() {
        init_config();
        let mut store = SessionStore::new();
        let token = store.create(7, "c@shop.example".into(), "Casey".into(), Role::Cashier);

        let session = store.validate(&token).expect("fresh session validates");
        assert_eq!(session.actor().id, 7);
        assert_eq!(session.actor().role, Role::Cashier);

        store.destroy(&token);
        assert!(store.validate(&token).is_none());
    }

    #[test]
    fn unknown_tokens_do_not_validate() {
        init_config();
        let store = SessionStore::new();
        assert!(store.validate("not-a-token").is_none());
    }
}
