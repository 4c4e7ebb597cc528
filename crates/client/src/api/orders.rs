//! Order gateway.
//!
//! Submits a cart snapshot as an order and reads order history. Both calls
//! require an authenticated session; an observed 401 destroys the session
//! via the shared client.

use tracing::instrument;

use crate::api::types::{Order, OrderItemPayload, OrderPayload};
use crate::api::{ApiClient, paths};
use crate::error::ApiError;
use crate::stores::cart::CartLine;

/// Gateway for the backend's order endpoints.
#[derive(Debug, Clone)]
pub struct OrderGateway {
    api: ApiClient,
}

impl OrderGateway {
    /// Create an order gateway over a shared client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the authenticated user's order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if the session credential is
    /// missing or expired (the session is destroyed as a side effect), and
    /// the normalized wire taxonomy for other failures.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get_json(paths::ORDERS).await
    }

    /// Submit a cart snapshot as a new order.
    ///
    /// Works from a point-in-time snapshot so concurrent cart mutation
    /// cannot change the submission mid-flight. The caller is responsible
    /// for clearing the cart after success; this gateway holds no state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyCart`] before any network call if the
    /// snapshot is empty; otherwise as for [`Self::list_orders`], plus
    /// [`ApiError::Validation`] when the backend rejects a line (e.g.
    /// insufficient stock at submission time).
    #[instrument(skip(self, snapshot), fields(lines = snapshot.len()))]
    pub async fn place_order(&self, snapshot: &[CartLine]) -> Result<Order, ApiError> {
        if snapshot.is_empty() {
            return Err(ApiError::EmptyCart);
        }

        let payload = OrderPayload {
            items: snapshot
                .iter()
                .map(|line| OrderItemPayload {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
        };

        let order: Order = self.api.post_json(paths::ORDERS, &payload).await?;
        tracing::info!(order_id = %order.id, "Order placed");

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::config::ShopConfig;
    use crate::persist::MemoryStore;
    use crate::stores::session::SessionStore;

    fn gateway() -> OrderGateway {
        let config = ShopConfig {
            api_url: Url::parse("http://localhost:8000/api/").expect("url"),
            data_dir: PathBuf::from(".shopfront"),
            request_timeout: Duration::from_secs(5),
        };
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        OrderGateway::new(ApiClient::new(&config, session))
    }

    #[tokio::test]
    async fn test_empty_snapshot_fails_before_network() {
        let gateway = gateway();
        // The configured backend isn't running; reaching the network would
        // surface as Unreachable, not EmptyCart
        let result = gateway.place_order(&[]).await;
        assert!(matches!(result, Err(ApiError::EmptyCart)));
    }
}
