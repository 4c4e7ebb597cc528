//! Shopfront client library.
//!
//! A client for a remote shop backend: product browsing, shopping cart,
//! authentication, and order placement, implemented as CRUD calls against the
//! backend HTTP API.
//!
//! # Architecture
//!
//! - [`stores`] - Observable state containers for cart contents and the auth
//!   session, persisted through [`persist`] and synchronized across consumers.
//! - [`api`] - A shared HTTP core plus stateless gateways, one per category of
//!   remote call (auth, catalog, orders). Gateways normalize backend failures
//!   into the [`error::ApiError`] taxonomy.
//! - [`persist`] - A minimal key-value persistence abstraction with in-memory
//!   and file-backed implementations.
//!
//! Stores and gateways are explicitly constructed and passed to consumers;
//! there is no ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod persist;
pub mod stores;
