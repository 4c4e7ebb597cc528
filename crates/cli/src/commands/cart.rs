//! Cart management commands.
//!
//! Adding a product fetches a fresh snapshot from the catalog first, so
//! stock ceilings reflect the backend's current numbers.

use shopfront_client::error::ApiError;
use shopfront_client::stores::UpdateOutcome;
use shopfront_core::ProductId;

use super::Storefront;

/// Print the cart contents and derived totals.
pub fn show(storefront: &Storefront) {
    let lines = storefront.cart.snapshot();

    if lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("{:>5}  {:<32} {:>5} {:>10} {:>11}", "ID", "PRODUCT", "QTY", "PRICE", "LINE TOTAL");
    for line in &lines {
        println!(
            "{:>5}  {:<32} {:>5} {:>10} {:>11}",
            line.product.id,
            line.product.name,
            line.quantity,
            format!("${}", line.product.price),
            format!("${:.2}", line.line_total()),
        );
    }

    let summary = storefront.cart.summary();
    println!();
    println!("{} item(s), total ${:.2}", summary.item_count, summary.total_price);
}

/// Add a product to the cart.
pub async fn add(
    storefront: &Storefront,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), ApiError> {
    let product = storefront.catalog.get_product(product_id).await?;
    let outcome = storefront.cart.add(&product, quantity);
    println!("{}", outcome.notice());
    Ok(())
}

/// Set the quantity for a product already in the cart.
pub fn set_quantity(storefront: &Storefront, product_id: ProductId, quantity: u32) {
    let outcome = storefront.cart.update_quantity(product_id, quantity);

    match &outcome {
        UpdateOutcome::Absent => println!("That product is not in your cart."),
        UpdateOutcome::Set { name, quantity } => println!("{name}: quantity set to {quantity}."),
        _ => {
            if let Some(notice) = outcome.notice() {
                println!("{notice}");
            }
        }
    }
}

/// Remove a product from the cart.
pub fn remove(storefront: &Storefront, product_id: ProductId) {
    match storefront.cart.remove(product_id) {
        Some(line) => println!("{} removed.", line.product.name),
        None => println!("That product is not in your cart."),
    }
}

/// Empty the cart.
pub fn clear(storefront: &Storefront) {
    storefront.cart.clear();
    println!("Cart cleared.");
}
