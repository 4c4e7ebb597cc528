//! Observable shopping cart store.
//!
//! Holds the cart's line items, derives item count and total price, persists
//! after every mutation, and notifies observers synchronously. Stock limits
//! are enforced against the product snapshot each line carries: a line's
//! quantity never exceeds the product's stock as of the last sync, and lines
//! never exist with quantity zero.
//!
//! Expected conditions (out-of-stock add, absent line) are reported through
//! structured outcomes, not errors; each outcome renders a user-facing notice.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::ProductId;

use crate::api::types::Product;
use crate::persist::{self, KeyValueStore, keys};
use crate::stores::signal::Subscribers;

/// One product-and-quantity pairing within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product as it looked when added.
    pub product: Product,
    /// Always within `1..=product.stock`.
    pub quantity: u32,
}

impl CartLine {
    /// Total price for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.line_total(self.quantity)
    }
}

/// Derived cart totals, recomputed from scratch after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of quantities across all lines.
    pub item_count: u32,
    /// Sum of `unit price × quantity` across all lines.
    pub total_price: Decimal,
}

/// Result of [`CartStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The requested quantity was added in full.
    Added {
        /// Product name, for the notice.
        name: String,
        /// Units added by this call.
        added: u32,
        /// Line quantity after the add.
        total: u32,
    },
    /// Stock capped the add; only part of the requested quantity went in.
    Clipped {
        /// Product name, for the notice.
        name: String,
        /// Units actually added (may be less than requested).
        added: u32,
        /// The stock ceiling that applied.
        stock: u32,
    },
    /// The line already holds the full stock; nothing was added.
    AtStockCeiling {
        /// Product name, for the notice.
        name: String,
        /// The stock ceiling that applied.
        stock: u32,
    },
    /// The product is out of stock and not in the cart; nothing was added.
    OutOfStock {
        /// Product name, for the notice.
        name: String,
    },
}

impl AddOutcome {
    /// Whether this outcome changed the cart.
    #[must_use]
    pub const fn mutated(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Clipped { .. })
    }

    /// User-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Added { name, added, total } => {
                format!("Added {added} {name}(s) to cart. Total: {total}.")
            }
            Self::Clipped { name, added, stock } => {
                format!("Added {added} {name}(s) (max stock: {stock}).")
            }
            Self::AtStockCeiling { name, stock } => {
                format!("Max stock ({stock}) for {name} already in cart.")
            }
            Self::OutOfStock { name } => {
                format!("{name} is out of stock. Cannot add to cart.")
            }
        }
    }
}

/// Result of [`CartStore::update_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Quantity set exactly as requested.
    Set {
        /// Product name, for the notice.
        name: String,
        /// The quantity now on the line.
        quantity: u32,
    },
    /// Requested quantity exceeded stock and was clamped down to it.
    Clamped {
        /// Product name, for the notice.
        name: String,
        /// The stock ceiling the quantity was clamped to.
        stock: u32,
    },
    /// Quantity zero removed the line.
    Removed {
        /// Product name, for the notice.
        name: String,
    },
    /// No line for that product; nothing changed.
    Absent,
}

impl UpdateOutcome {
    /// User-facing notice for this outcome, if one applies.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Set { .. } | Self::Absent => None,
            Self::Clamped { name, stock } => {
                Some(format!("Max stock for {name} is {stock}."))
            }
            Self::Removed { name } => Some(format!("{name} removed from cart.")),
        }
    }
}

struct CartState {
    lines: Vec<CartLine>,
    summary: CartSummary,
}

struct CartInner {
    state: Mutex<CartState>,
    storage: Arc<dyn KeyValueStore>,
    observers: Subscribers<CartSummary>,
}

/// Observable cart store.
///
/// Cheaply cloneable handle over shared state. Each operation runs to
/// completion under the store's lock - memory update, persisted write,
/// derived-total recompute - so operations never interleave; observers are
/// notified after the lock is released.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl CartStore {
    /// Create a cart store, loading any persisted contents from `storage`.
    ///
    /// Corrupt or unreadable persisted state degrades to an empty cart.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let lines: Vec<CartLine> =
            persist::load_json(storage.as_ref(), keys::CART).unwrap_or_default();
        let summary = summarize(&lines);

        Self {
            inner: Arc::new(CartInner {
                state: Mutex::new(CartState { lines, summary }),
                storage,
                observers: Subscribers::new(),
            }),
        }
    }

    /// Register an observer called with the recomputed summary after every
    /// mutation.
    pub fn subscribe(&self, observer: impl Fn(&CartSummary) + Send + 'static) {
        self.inner.observers.subscribe(observer);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product` to the cart.
    ///
    /// An out-of-stock product that is not already in the cart is rejected
    /// with [`AddOutcome::OutOfStock`]. An existing line grows up to the
    /// stock ceiling; a new line is inserted with its quantity clipped to
    /// stock. Excess requested quantity is reported, never stored.
    pub fn add(&self, product: &Product, quantity: u32) -> AddOutcome {
        let mut state = self.lock_state();

        // Grow an existing line if there is one; otherwise insert, unless the
        // product is out of stock
        let grown = state
            .lines
            .iter_mut()
            .find(|l| l.product.id == product.id)
            .map(|line| grow_line(line, quantity));

        let outcome = grown.unwrap_or_else(|| {
            if product.stock == 0 {
                return AddOutcome::OutOfStock {
                    name: product.name.clone(),
                };
            }

            let added = quantity.min(product.stock);
            state.lines.push(CartLine {
                product: product.clone(),
                quantity: added,
            });
            if quantity > product.stock {
                AddOutcome::Clipped {
                    name: product.name.clone(),
                    added,
                    stock: product.stock,
                }
            } else {
                AddOutcome::Added {
                    name: product.name.clone(),
                    added,
                    total: added,
                }
            }
        });

        if outcome.mutated() {
            let summary = self.commit(&mut state);
            drop(state);
            self.inner.observers.notify(&summary);
        }

        outcome
    }

    /// Remove the line for `product_id`, returning it if it was present.
    ///
    /// Removing an absent product is a silent no-op.
    pub fn remove(&self, product_id: ProductId) -> Option<CartLine> {
        let mut state = self.lock_state();

        let index = state.lines.iter().position(|l| l.product.id == product_id)?;
        let removed = state.lines.remove(index);

        let summary = self.commit(&mut state);
        drop(state);
        self.inner.observers.notify(&summary);

        Some(removed)
    }

    /// Set the quantity for `product_id`, clamped to `[0, stock]`.
    ///
    /// Quantity zero removes the line; a quantity above stock clamps to
    /// stock and reports it. Updating an absent product changes nothing.
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) -> UpdateOutcome {
        let mut state = self.lock_state();

        let Some(index) = state.lines.iter().position(|l| l.product.id == product_id) else {
            return UpdateOutcome::Absent;
        };

        let outcome = {
            // `index` came from `position` under the same lock
            let Some(line) = state.lines.get_mut(index) else {
                return UpdateOutcome::Absent;
            };
            let stock = line.product.stock;

            if quantity == 0 {
                let name = line.product.name.clone();
                state.lines.remove(index);
                UpdateOutcome::Removed { name }
            } else if quantity > stock {
                line.quantity = stock;
                UpdateOutcome::Clamped {
                    name: line.product.name.clone(),
                    stock,
                }
            } else {
                line.quantity = quantity;
                UpdateOutcome::Set {
                    name: line.product.name.clone(),
                    quantity,
                }
            }
        };

        let summary = self.commit(&mut state);
        drop(state);
        self.inner.observers.notify(&summary);

        outcome
    }

    /// Empty the cart and its persisted storage.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.lines.clear();
        state.summary = CartSummary::default();
        persist::discard(self.inner.storage.as_ref(), keys::CART);

        let summary = state.summary.clone();
        drop(state);
        self.inner.observers.notify(&summary);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Point-in-time copy of the cart lines.
    ///
    /// Used for order submission so a multi-step operation works from a
    /// stable view rather than racing concurrent mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lock_state().lines.clone()
    }

    /// Current derived totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.lock_state().summary.clone()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock_state().summary.item_count
    }

    /// Sum of `unit price × quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lock_state().summary.total_price
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_state().lines.is_empty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_state(&self) -> MutexGuard<'_, CartState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the lines and recompute derived totals. Totals are always
    /// rebuilt from the full line list, never adjusted incrementally.
    fn commit(&self, state: &mut CartState) -> CartSummary {
        persist::save_json(self.inner.storage.as_ref(), keys::CART, &state.lines);
        state.summary = summarize(&state.lines);
        state.summary.clone()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("CartStore")
            .field("lines", &state.lines.len())
            .field("summary", &state.summary)
            .finish()
    }
}

fn summarize(lines: &[CartLine]) -> CartSummary {
    CartSummary {
        item_count: lines.iter().map(|l| l.quantity).sum(),
        total_price: lines.iter().map(CartLine::line_total).sum(),
    }
}

/// Grow an existing line by `quantity`, clipping at the line's stock ceiling.
fn grow_line(line: &mut CartLine, quantity: u32) -> AddOutcome {
    let stock = line.product.stock;

    if line.quantity >= stock {
        AddOutcome::AtStockCeiling {
            name: line.product.name.clone(),
            stock,
        }
    } else if line.quantity.saturating_add(quantity) <= stock {
        line.quantity += quantity;
        AddOutcome::Added {
            name: line.product.name.clone(),
            added: quantity,
            total: line.quantity,
        }
    } else {
        let added = stock - line.quantity;
        line.quantity = stock;
        AddOutcome::Clipped {
            name: line.product.name.clone(),
            added,
            stock,
        }
    }
}
