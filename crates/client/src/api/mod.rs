//! Backend API access.
//!
//! # Architecture
//!
//! - [`ApiClient`] is the shared HTTP core: it joins endpoint paths onto the
//!   configured base address, injects the bearer credential only for requests
//!   targeting that base address, and normalizes failures into
//!   [`crate::error::ApiError`]. An observed 401 is routed into the
//!   [`SessionStore`] as an authorization-failure signal.
//! - Gateways ([`AuthGateway`], [`CatalogGateway`], [`OrderGateway`]) each
//!   perform one category of remote call. They hold no state of their own
//!   beyond the shared client (and, for the catalog, a read cache).
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::api::{ApiClient, CatalogGateway, OrderGateway};
//!
//! let api = ApiClient::new(&config, session.clone());
//! let catalog = CatalogGateway::new(api.clone());
//!
//! let products = catalog.list_products().await?;
//! let order = OrderGateway::new(api).place_order(&cart.snapshot()).await?;
//! ```

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod types;

pub use auth::AuthGateway;
pub use catalog::CatalogGateway;
pub use orders::OrderGateway;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use shopfront_core::AccessToken;

use crate::config::ShopConfig;
use crate::error::{ApiError, normalize_error_response};
use crate::stores::session::SessionStore;

/// Endpoint paths, relative to the configured base address.
///
/// The backend routes all end in a trailing slash; keep it, or every request
/// bounces through a redirect.
pub mod paths {
    pub const LOGIN: &str = "login/";
    pub const REGISTER: &str = "register/";
    pub const TOKEN_REFRESH: &str = "token/refresh/";
    pub const PRODUCTS: &str = "products/";
    pub const CATEGORIES: &str = "categories/";
    pub const ORDERS: &str = "orders/";
}

// =============================================================================
// ApiClient
// =============================================================================

/// Shared HTTP core for all gateways.
///
/// Cheaply cloneable handle; every gateway built from the same client shares
/// its connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client for the backend at `config.api_url`.
    #[must_use]
    pub fn new(config: &ShopConfig, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                request_timeout: config.request_timeout,
                session,
            }),
        }
    }

    /// The session store this client feeds authorization signals into.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Absolute URL for an endpoint path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Whether `url` targets the backend's base address.
    ///
    /// The bearer credential is attached only to such requests; anything else
    /// (absolute image URLs, for instance) goes out bare.
    fn is_api_target(&self, url: &str) -> bool {
        url.starts_with(self.inner.base_url.as_str())
    }

    fn bearer_for(&self, url: &str) -> Option<AccessToken> {
        if self.is_api_target(url) {
            self.inner.session.current_token()
        } else {
            None
        }
    }

    /// GET an endpoint, routing observed 401s into the session store.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, true).await
    }

    /// POST to an endpoint, routing observed 401s into the session store.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), true).await
    }

    /// POST to an authentication endpoint.
    ///
    /// A 401 here means the submitted credentials were wrong, not that the
    /// held session expired, so it must not tear the session down.
    pub(crate) async fn post_json_unrouted<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), false).await
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        route_unauthorized: bool,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let mut builder = self
            .inner
            .http
            .request(method, url.as_str())
            .timeout(self.inner.request_timeout);

        if let Some(token) = self.bearer_for(&url) {
            builder = builder.bearer_auth(token.reveal());
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            tracing::debug!(
                %status,
                path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );

            let error = normalize_error_response(status, &response_text);
            if route_unauthorized && matches!(error, ApiError::Unauthorized) {
                self.inner.session.note_authorization_failure();
            }
            return Err(error);
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::from(e)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish()
    }
}
