//! Gateway tests against a live shop backend.
//!
//! These tests require:
//! - A running shop backend (default: <http://localhost:8000/api/>)
//! - Open registration on that backend
//!
//! Run with: `cargo test -p shopfront-integration-tests -- --ignored`

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use shopfront_client::api::types::{LoginRequest, Registration};
use shopfront_client::api::{ApiClient, AuthGateway, CatalogGateway, OrderGateway};
use shopfront_client::config::ShopConfig;
use shopfront_client::error::ApiError;
use shopfront_client::persist::MemoryStore;
use shopfront_client::stores::{CartStore, SessionStore};
use shopfront_core::Email;

/// Base URL for the shop backend (configurable via environment).
fn backend_config() -> ShopConfig {
    let base = std::env::var("SHOPFRONT_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/".to_string());
    ShopConfig {
        api_url: base.parse().expect("SHOPFRONT_API_URL must be a valid URL"),
        data_dir: std::env::temp_dir().join("shopfront-live-tests"),
        request_timeout: Duration::from_secs(10),
    }
}

struct LiveHarness {
    session: SessionStore,
    cart: CartStore,
    auth: AuthGateway,
    catalog: CatalogGateway,
    orders: OrderGateway,
}

/// Wire a fresh client over in-memory storage.
fn harness() -> LiveHarness {
    let storage = Arc::new(MemoryStore::new());
    let shared: Arc<dyn shopfront_client::persist::KeyValueStore> = storage.clone();
    let session = SessionStore::new(shared);
    let cart = CartStore::new(storage);
    let api = ApiClient::new(&backend_config(), session.clone());

    LiveHarness {
        session,
        cart,
        auth: AuthGateway::new(api.clone()),
        catalog: CatalogGateway::new(api.clone()),
        orders: OrderGateway::new(api),
    }
}

/// Register a throwaway user and leave the session logged in.
async fn register_test_user(harness: &LiveHarness) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("it-user-{}", &suffix[..12]);

    let registration = Registration {
        username: username.clone(),
        email: Email::parse(&format!("{username}@example.com")).expect("valid email"),
        password: format!("pw-{suffix}"),
        password_confirm: format!("pw-{suffix}"),
    };

    harness
        .auth
        .register(&registration)
        .await
        .expect("registration against live backend");

    username
}

#[tokio::test]
#[ignore = "Requires running shop backend"]
async fn products_are_listable_anonymously() {
    let harness = harness();
    let products = harness
        .catalog
        .list_products()
        .await
        .expect("product list from live backend");

    for product in &products {
        assert!(!product.name.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires running shop backend"]
async fn register_login_roundtrip() {
    let harness = harness();
    let username = register_test_user(&harness).await;
    assert!(harness.session.is_authenticated());

    harness.session.logout();
    assert!(!harness.session.is_authenticated());

    // Wrong password is rejected without touching the (absent) session
    let rejected = harness
        .auth
        .login(&LoginRequest {
            username: username.clone(),
            password: "wrong-password".to_string(),
        })
        .await;
    assert!(matches!(rejected, Err(ApiError::Unauthorized)));
    assert!(!harness.session.is_authenticated());
}

#[tokio::test]
#[ignore = "Requires running shop backend"]
async fn orders_require_authentication() {
    let harness = harness();
    let result = harness.orders.list_orders().await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
#[ignore = "Requires running shop backend"]
async fn place_order_for_first_in_stock_product() {
    let harness = harness();
    register_test_user(&harness).await;

    let products = harness
        .catalog
        .list_products()
        .await
        .expect("product list from live backend");
    let Some(in_stock) = products.iter().find(|p| p.stock > 0) else {
        // Nothing purchasable seeded; nothing to assert against
        return;
    };

    harness.cart.add(in_stock, 1);
    let order = harness
        .orders
        .place_order(&harness.cart.snapshot())
        .await
        .expect("order placement against live backend");

    assert_eq!(order.items.len(), 1);
    harness.cart.clear();

    let history = harness
        .orders
        .list_orders()
        .await
        .expect("order history from live backend");
    assert!(history.iter().any(|o| o.id == order.id));
}
