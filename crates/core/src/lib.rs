//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `client` - The storefront client library (stores, gateways, persistence)
//! - `cli` - Command-line front end for browsing, cart, and orders
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
