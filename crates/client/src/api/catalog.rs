//! Catalog gateway.
//!
//! Read-only access to products and categories. Catalog reads are cached
//! in-memory with a short TTL; cart and order traffic never goes through
//! this cache.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use shopfront_core::ProductId;

use crate::api::types::{Category, Product};
use crate::api::{ApiClient, paths};
use crate::error::ApiError;

/// How long catalog responses stay cached.
const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;

#[derive(Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<Category>),
}

/// Gateway for the backend's catalog endpoints.
#[derive(Clone)]
pub struct CatalogGateway {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl CatalogGateway {
    /// Create a catalog gateway over a shared client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self { api, cache }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns the normalized wire taxonomy if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products: Vec<Product> = self.api.get_json(paths::PRODUCTS).await?;

        self.cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns the normalized wire taxonomy if the product does not exist or
    /// the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("{}{product_id}/", paths::PRODUCTS);
        let product: Product = self.api.get_json(&path).await?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns the normalized wire taxonomy if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for category list");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.api.get_json(paths::CATEGORIES).await?;

        self.cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Drop all cached catalog data.
    ///
    /// Useful after placing an order, when stock counts are known stale.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for CatalogGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogGateway")
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}
