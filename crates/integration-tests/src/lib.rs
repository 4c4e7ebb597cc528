//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! # Store and persistence flows (no external services)
//! cargo test -p shopfront-integration-tests
//!
//! # Live-backend tests (requires a running shop backend)
//! SHOPFRONT_API_URL=http://localhost:8000/api/ \
//!     cargo test -p shopfront-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart store + persistence flows
//! - `session_flow` - Session store + persistence flows
//! - `live_backend` - Gateway calls against a real backend (`#[ignore]`d)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use shopfront_client::api::types::{Category, Product};
use shopfront_core::{CategoryId, ProductId};

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique scratch directory for file-backed persistence tests.
#[must_use]
pub fn scratch_dir(label: &str) -> std::path::PathBuf {
    let id = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "shopfront-it-{label}-{}-{id}",
        std::process::id()
    ))
}

/// Build a product fixture with the given stock and price.
///
/// # Panics
///
/// Panics if `price` is not a valid decimal string.
#[must_use]
pub fn product_fixture(id: i32, stock: u32, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: "Fixture product".to_string(),
        price: price.parse().expect("valid decimal price"),
        stock,
        image_url: None,
        category: Category {
            id: CategoryId::new(1),
            name: "General".to_string(),
            slug: "general".to_string(),
        },
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
