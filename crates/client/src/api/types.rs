//! Wire types for the shop backend API.
//!
//! Field names and shapes mirror the backend's JSON exactly; domain-typed
//! wrappers (IDs, prices, credentials) come from `shopfront-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{
    AccessToken, CategoryId, Email, OrderId, OrderItemId, Price, ProductId, RefreshToken, UserId,
};

// =============================================================================
// Catalog
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A product as supplied by the backend.
///
/// Immutable from the client's perspective; cart lines carry a snapshot of
/// the product as it looked when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Units available at the time the product was fetched.
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Authentication
// =============================================================================

/// The authenticated user's identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Response body of the login and register endpoints.
///
/// `access` is optional at the serde level so a malformed success response
/// surfaces as a session-consistency failure, not a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: Option<AccessToken>,
    #[serde(default)]
    pub refresh: Option<RefreshToken>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response body of the token refresh endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request payload.
///
/// `password_confirm` is checked against `password` client-side before the
/// request is sent; the backend re-validates.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of a placed order, as read back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    /// Unit price captured at purchase time; the live product price may have
    /// changed since.
    pub price_at_purchase: Price,
}

/// A placed order. Backend-owned and read-only to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Username of the ordering customer.
    pub customer: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_price: Price,
}

/// One line of an order submission.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemPayload {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Order submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub items: Vec<OrderItemPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let json = r#"{
            "id": 1,
            "name": "Keyboard",
            "description": "Mechanical",
            "price": "59.90",
            "stock": 12,
            "image_url": null,
            "category": {"id": 2, "name": "Peripherals", "slug": "peripherals"},
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.stock, 12);
        assert_eq!(product.price, "59.90".parse().expect("price"));
        assert_eq!(product.category.slug, "peripherals");
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_auth_response_without_access_token() {
        let response: AuthResponse = serde_json::from_str(r#"{"user": null}"#).expect("deserialize");
        assert!(response.access.is_none());
        assert!(response.refresh.is_none());
        assert!(response.user.is_none());
    }

    #[test]
    fn test_order_payload_wire_shape() {
        let payload = OrderPayload {
            items: vec![OrderItemPayload {
                product_id: ProductId::new(3),
                quantity: 2,
            }],
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"items": [{"product_id": 3, "quantity": 2}]})
        );
    }
}
