//! Observable state containers.
//!
//! Each store is an explicitly constructed, cheaply cloneable handle over
//! shared state, persisted through [`crate::persist`] and observed through
//! [`signal::Subscribers`]. Nothing here is a global; consumers receive the
//! store handles they need at construction time.

pub mod cart;
pub mod session;
pub mod signal;

pub use cart::{AddOutcome, CartLine, CartStore, CartSummary, UpdateOutcome};
pub use session::{Session, SessionError, SessionStore};
