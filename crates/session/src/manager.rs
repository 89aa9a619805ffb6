//! Session manager: the token lifecycle state machine
//!
//! LoggedOut → (login success) → LoggedIn → (logout | expiry | server
//! 401/403) → LoggedOut. The manager owns the store; login itself lives on
//! the API client, which calls [`SessionManager::store_token`] on success.

use std::sync::Arc;

use crate::claims::Claims;
use crate::store::{SessionStore, StoreError};

/// Owns the stored token and answers authentication questions about it
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Read the stored token.
    ///
    /// Store read failures degrade to "no session" with a warning rather
    /// than surfacing an error to every caller.
    pub fn token(&self) -> Option<String> {
        match self.store.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Session store read failed; treating as logged out");
                None
            }
        }
    }

    /// Persist a freshly issued token, overwriting any previous one
    pub fn store_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(token)
    }

    /// Unconditionally drop the stored token. Idempotent, no network call.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session store on logout");
        }
    }

    /// Claims decoded from the stored token.
    ///
    /// Absent when there is no token or the claims segment is malformed.
    /// Decoded on demand, never cached.
    pub fn claims(&self) -> Option<Claims> {
        self.token().as_deref().and_then(Claims::decode)
    }

    /// The acting teacher's identifier, resolved from the claims
    pub fn subject_id(&self) -> Option<String> {
        self.claims().and_then(|c| c.subject())
    }

    /// Whether the stored token is still valid for use.
    ///
    /// No token: false. Undecodable claims: true (a decode failure is not
    /// expiry). Decoded claims without `exp`: true. With `exp`: true iff
    /// the current instant is strictly before it.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated_at(chrono::Utc::now().timestamp())
    }

    fn authenticated_at(&self, now: i64) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match Claims::decode(&token).and_then(|c| c.exp) {
            Some(exp) => (now as u64) < exp,
            None => true,
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("token", &self.token().map(|_| "[REDACTED]"))
            .finish()
    }
}
