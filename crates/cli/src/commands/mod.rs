//! CLI command implementations.
//!
//! Each module covers one command family. UI-layer policy lives here, not in
//! the client library: route guarding (orders require a login), clearing the
//! cart after a successful order, and rendering notices.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

use shopfront_client::api::{AuthGateway, CatalogGateway, OrderGateway};
use shopfront_client::stores::{CartStore, SessionStore};

/// The wired-up client: stores plus gateways, passed to every command.
pub struct Storefront {
    pub session: SessionStore,
    pub cart: CartStore,
    pub auth: AuthGateway,
    pub catalog: CatalogGateway,
    pub orders: OrderGateway,
}
