//! Cart store + persistence flows over the file-backed store.
//!
//! These exercise the same wiring the CLI uses: a `FileStore` under a scratch
//! directory, with "process restarts" simulated by rebuilding the stores over
//! the same directory.

use std::sync::Arc;

use shopfront_client::persist::{FileStore, KeyValueStore};
use shopfront_client::stores::{AddOutcome, CartStore, UpdateOutcome};
use shopfront_integration_tests::{product_fixture, scratch_dir};

fn file_storage(label: &str) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(scratch_dir(label)).expect("create scratch store"))
}

#[test]
fn cart_survives_restart() {
    let dir = scratch_dir("cart-restart");
    let keyboard = product_fixture(1, 10, "59.90");
    let mouse = product_fixture(2, 4, "19.99");

    {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(&dir).expect("create scratch store"));
        let cart = CartStore::new(storage);
        cart.add(&keyboard, 2);
        cart.add(&mouse, 1);
    }

    // New process, same data directory
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    let cart = CartStore::new(storage);

    assert_eq!(cart.item_count(), 3);
    assert_eq!(
        cart.total_price(),
        "139.79".parse().expect("decimal total")
    );
    let snapshot = cart.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].product.name, "Product 1");
}

#[test]
fn clear_empties_persisted_state_across_restart() {
    let dir = scratch_dir("cart-clear");

    {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(&dir).expect("create scratch store"));
        let cart = CartStore::new(storage);
        cart.add(&product_fixture(1, 5, "2.00"), 3);
        cart.clear();
    }

    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    let cart = CartStore::new(storage);
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn stock_ceiling_holds_through_a_full_shopping_session() {
    let cart = CartStore::new(file_storage("cart-ceiling"));
    let scarce = product_fixture(7, 5, "3.00");

    assert!(matches!(
        cart.add(&scarce, 3),
        AddOutcome::Added { total: 3, .. }
    ));
    // 3 in cart, 4 more requested: clipped to the stock of 5
    assert!(matches!(
        cart.add(&scarce, 4),
        AddOutcome::Clipped { added: 2, stock: 5, .. }
    ));
    assert!(matches!(
        cart.add(&scarce, 1),
        AddOutcome::AtStockCeiling { stock: 5, .. }
    ));

    assert!(matches!(
        cart.update_quantity(scarce.id, 99),
        UpdateOutcome::Clamped { stock: 5, .. }
    ));
    assert_eq!(cart.item_count(), 5);

    assert!(matches!(
        cart.update_quantity(scarce.id, 0),
        UpdateOutcome::Removed { .. }
    ));
    assert!(cart.is_empty());
}

#[test]
fn out_of_stock_product_never_enters_the_cart() {
    let cart = CartStore::new(file_storage("cart-oos"));
    let gone = product_fixture(9, 0, "10.00");

    let outcome = cart.add(&gone, 1);
    assert!(matches!(outcome, AddOutcome::OutOfStock { .. }));
    assert!(cart.is_empty());

    // The notice is user-facing, not an error
    assert!(outcome.notice().contains("out of stock"));
}

#[test]
fn totals_match_snapshot_arithmetic_after_mixed_mutations() {
    let cart = CartStore::new(file_storage("cart-totals"));
    let a = product_fixture(1, 10, "1.25");
    let b = product_fixture(2, 10, "0.10");
    let c = product_fixture(3, 2, "100.00");

    cart.add(&a, 4);
    cart.add(&b, 7);
    cart.add(&c, 5); // clipped to 2
    cart.update_quantity(b.id, 3);
    cart.remove(a.id);

    let snapshot = cart.snapshot();
    let expected_count: u32 = snapshot.iter().map(|l| l.quantity).sum();
    let expected_total = snapshot
        .iter()
        .map(shopfront_client::stores::CartLine::line_total)
        .sum();

    assert_eq!(cart.item_count(), expected_count);
    assert_eq!(cart.total_price(), expected_total);
    assert_eq!(cart.total_price(), "200.30".parse().expect("decimal"));
}
