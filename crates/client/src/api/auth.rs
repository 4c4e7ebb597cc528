//! Authentication gateway.
//!
//! Performs login, registration, and token refresh against the backend and
//! routes successful responses into the [`SessionStore`]. Failures are
//! propagated as normalized [`ApiError`]s without touching session state.

use tracing::instrument;

use crate::api::types::{AuthResponse, LoginRequest, RefreshResponse, Registration};
use crate::api::{ApiClient, paths};
use crate::error::ApiError;
use crate::stores::session::SessionStore;

/// Gateway for the backend's authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    /// Create an authentication gateway over a shared client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Log in with username and password.
    ///
    /// On success the response is recorded into the session store before
    /// returning. On failure session state is left untouched: a rejected
    /// login attempt must not destroy an existing session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials, the
    /// normalized wire taxonomy for other backend failures, and
    /// [`ApiError::Session`] if a success response carried no credential.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .api
            .post_json_unrouted(paths::LOGIN, credentials)
            .await?;

        self.session().record_auth_success(&response)?;
        tracing::info!("Logged in");

        Ok(response)
    }

    /// Register a new account.
    ///
    /// The password/confirmation match is checked locally before anything is
    /// sent; a mismatch never reaches the network. On success the response
    /// is recorded into the session store exactly as for login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PasswordMismatch`] if the confirmation differs,
    /// [`ApiError::Validation`] for backend field errors (taken username,
    /// weak password), and otherwise as for [`Self::login`].
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        if registration.password != registration.password_confirm {
            return Err(ApiError::PasswordMismatch);
        }

        let response: AuthResponse = self
            .api
            .post_json_unrouted(paths::REGISTER, registration)
            .await?;

        self.session().record_auth_success(&response)?;
        tracing::info!("Registered and logged in");

        Ok(response)
    }

    /// Exchange the held refresh credential for a fresh access credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if no refresh credential is held
    /// or the backend rejects it; the wire taxonomy otherwise.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.session().current_refresh_token() else {
            return Err(ApiError::Unauthorized);
        };

        let body = serde_json::json!({ "refresh": refresh.reveal() });
        let response: RefreshResponse = self
            .api
            .post_json_unrouted(paths::TOKEN_REFRESH, &body)
            .await?;

        self.session().record_access_token(&response.access);
        tracing::debug!("Access credential refreshed");

        Ok(())
    }
}
