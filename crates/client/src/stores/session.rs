//! Observable authentication session store.
//!
//! Two states, Anonymous and Authenticated. Anonymous becomes Authenticated
//! only through [`SessionStore::record_auth_success`]; Authenticated becomes
//! Anonymous through [`SessionStore::logout`] or through an authorization
//! failure observed by the gateway layer and routed in via
//! [`SessionStore::note_authorization_failure`]. The initial state is derived
//! from whatever credential persisted storage holds at construction.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use shopfront_core::{AccessToken, RefreshToken};

use crate::api::types::{AuthResponse, User};
use crate::persist::{self, KeyValueStore, keys};
use crate::stores::signal::Subscribers;

/// Errors that can occur when establishing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend reported success but sent no access credential.
    #[error("Authentication response did not include an access credential.")]
    MissingAccessToken,
}

/// The client-held record of authentication status and identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Whether a credential is currently held.
    pub authenticated: bool,
    /// Identity record, when the backend supplied one.
    pub user: Option<User>,
}

struct SessionInner {
    state: Mutex<Session>,
    storage: Arc<dyn KeyValueStore>,
    observers: Subscribers<Session>,
}

/// Observable session store.
///
/// Cheaply cloneable handle over shared state; the credential itself stays in
/// persisted storage and is read back on demand, so it never sits readable in
/// a debug dump of the store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Create a session store, deriving the initial state from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let token: Option<AccessToken> = persist::load_json(storage.as_ref(), keys::AUTH_TOKEN);
        let user: Option<User> = persist::load_json(storage.as_ref(), keys::AUTH_USER);

        let session = Session {
            authenticated: token.is_some(),
            user,
        };

        Self {
            inner: Arc::new(SessionInner {
                state: Mutex::new(session),
                storage,
                observers: Subscribers::new(),
            }),
        }
    }

    /// Register an observer called with the session after every transition.
    pub fn subscribe(&self, observer: impl Fn(&Session) + Send + 'static) {
        self.inner.observers.subscribe(observer);
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Record a successful authentication response.
    ///
    /// Persists the access credential (and refresh credential, if present)
    /// and the user record, then marks the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingAccessToken`] if the response carries
    /// no access credential - an inconsistent success response. The store
    /// transitions to Anonymous and clears persisted credentials first, so
    /// a half-established session never survives.
    pub fn record_auth_success(&self, response: &AuthResponse) -> Result<(), SessionError> {
        let Some(access) = response.access.as_ref() else {
            tracing::error!("Authentication response missing access credential");
            self.logout();
            return Err(SessionError::MissingAccessToken);
        };

        let mut state = self.lock_state();

        let storage = self.inner.storage.as_ref();
        persist::save_json(storage, keys::AUTH_TOKEN, access);
        match response.refresh.as_ref() {
            Some(refresh) => persist::save_json(storage, keys::AUTH_REFRESH_TOKEN, refresh),
            None => persist::discard(storage, keys::AUTH_REFRESH_TOKEN),
        }
        match response.user.as_ref() {
            Some(user) => persist::save_json(storage, keys::AUTH_USER, user),
            None => persist::discard(storage, keys::AUTH_USER),
        }

        state.authenticated = true;
        state.user = response.user.clone();

        let session = state.clone();
        drop(state);
        self.inner.observers.notify(&session);

        Ok(())
    }

    /// Replace the access credential, keeping the rest of the session.
    ///
    /// Used after a token refresh; a refresh response carries no user record.
    pub fn record_access_token(&self, token: &AccessToken) {
        let state = self.lock_state();
        persist::save_json(self.inner.storage.as_ref(), keys::AUTH_TOKEN, token);
        drop(state);
    }

    /// Destroy the session: clear persisted credentials and the user record,
    /// and mark the session unauthenticated. Never fails.
    pub fn logout(&self) {
        let mut state = self.lock_state();

        let storage = self.inner.storage.as_ref();
        persist::discard(storage, keys::AUTH_TOKEN);
        persist::discard(storage, keys::AUTH_REFRESH_TOKEN);
        persist::discard(storage, keys::AUTH_USER);

        state.authenticated = false;
        state.user = None;

        let session = state.clone();
        drop(state);
        self.inner.observers.notify(&session);
    }

    /// An authorization failure was observed on a backend call.
    ///
    /// The gateway layer routes 401-class responses here; the held credential
    /// is no longer valid, so the session is destroyed.
    pub fn note_authorization_failure(&self) {
        tracing::warn!("Authorization failure observed, destroying session");
        self.logout();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The persisted access credential, or `None` if never set or cleared.
    #[must_use]
    pub fn current_token(&self) -> Option<AccessToken> {
        persist::load_json(self.inner.storage.as_ref(), keys::AUTH_TOKEN)
    }

    /// The persisted refresh credential, if any.
    #[must_use]
    pub fn current_refresh_token(&self) -> Option<RefreshToken> {
        persist::load_json(self.inner.storage.as_ref(), keys::AUTH_REFRESH_TOKEN)
    }

    /// The current identity record, if the backend supplied one.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock_state().user.clone()
    }

    /// Whether the session is Authenticated. Consumed by the UI layer as a
    /// route-guard predicate.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_state().authenticated
    }

    /// Copy of the current session record.
    #[must_use]
    pub fn session(&self) -> Session {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, Session> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.authenticated)
            .field("user", &state.user)
            .finish()
    }
}
