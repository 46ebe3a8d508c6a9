use super::session::SessionData;
use crate::errors::AppError;
use crate::models::user::{Actor, Role};
use crate::AppState;

/// Resolve a bearer token into the full session.
pub fn session(state: &AppState, token: &str) -> Result<SessionData, AppError> {
    let store = state
        .sessions
        .lock()
        .map_err(|e| AppError::Internal(format!("session store poisoned: {}", e)))?;
    store
        .validate(token)
        .cloned()
        .ok_or_else(|| AppError::Unauthenticated("invalid or expired session".into()))
}

/// Resolve a bearer token into the actor identity the ledger trusts.
pub fn authenticate(state: &AppState, token: &str) -> Result<Actor, AppError> {
    Ok(session(state, token)?.actor())
}

/// Owner-only surfaces call this with an already-authenticated actor.
pub fn require_owner(actor: &Actor) -> Result<(), AppError> {
    if actor.role != Role::Owner {
        return Err(AppError::Unauthorized("OWNER role required".into()));
    }
    Ok(())
}
