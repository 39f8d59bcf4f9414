// ABOUTME: Session state holder — the in-memory login mirrored to a durable key-value store.
// ABOUTME: Restores on startup, treats corrupt storage as logged out, and notifies subscribers.

use std::sync::Arc;

use crate::observable::{Observable, Subscription};
use crate::session::user::{Session, User};
use crate::store::{KeyValueStore, StoreError};

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Store key holding the JSON-serialized [`User`].
pub const USER_KEY: &str = "currentUser";

/// Owns the current [`Session`] and keeps the store in step with it.
pub struct SessionHolder {
    store: Arc<dyn KeyValueStore>,
    state: Observable<Option<Session>>,
}

impl SessionHolder {
    /// Create a holder with no session. Call [`restore`](Self::restore) to load a persisted one.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: Observable::new(None),
        }
    }

    /// Load a persisted session, if any. Never fails: unreadable or
    /// inconsistent storage is cleared and the holder stays logged out.
    pub fn restore(&self) {
        match self.read_persisted() {
            Ok(Some(session)) => {
                tracing::info!(user_id = session.user.id, "restored session");
                self.state.set(Some(session));
            }
            Ok(None) => {}
            Err(reason) => {
                tracing::warn!(%reason, "discarding persisted session");
                self.remove_persisted();
            }
        }
    }

    fn read_persisted(&self) -> Result<Option<Session>, String> {
        let token = self.store.get(TOKEN_KEY).map_err(|e| e.to_string())?;
        let user_json = self.store.get(USER_KEY).map_err(|e| e.to_string())?;

        match (token, user_json) {
            (None, None) => Ok(None),
            (Some(token), Some(user_json)) => {
                let user: User = serde_json::from_str(&user_json)
                    .map_err(|e| format!("stored user does not parse: {e}"))?;
                Ok(Some(Session { user, token }))
            }
            _ => Err("only one of token and user is stored".to_string()),
        }
    }

    /// Persist and install a new session, then notify subscribers.
    ///
    /// On a storage error the in-memory session is left unchanged. The two
    /// store writes are not atomic, so a failure on the second can leave the
    /// store half-written; the next `restore` clears that state.
    pub fn establish(&self, token: impl Into<String>, user: User) -> Result<(), StoreError> {
        let token = token.into();
        let user_json = serde_json::to_string(&user).map_err(|source| StoreError::Corrupt {
            path: USER_KEY.into(),
            source,
        })?;
        self.store.set(TOKEN_KEY, &token)?;
        self.store.set(USER_KEY, &user_json)?;

        tracing::info!(user_id = user.id, "session established");
        self.state.set(Some(Session { user, token }));
        Ok(())
    }

    /// Drop the session and its persisted copy. Safe to call repeatedly.
    pub fn clear(&self) {
        self.remove_persisted();
        if self.state.get().is_some() {
            tracing::info!("session cleared");
        }
        self.state.set(None);
    }

    fn remove_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted session field");
            }
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.state.get().map(|s| s.token)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.get().map(|s| s.user)
    }

    /// Subscribe to session changes. Callbacks run synchronously inside
    /// `establish`/`clear`, in subscription order.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Option<Session>) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.state.unsubscribe(subscription);
    }
}
