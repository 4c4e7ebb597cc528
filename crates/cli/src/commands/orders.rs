//! Order commands.
//!
//! Both commands are guarded on the session predicate before any network
//! call, mirroring the route guard in front of the order screens.

use shopfront_client::error::ApiError;

use super::Storefront;

/// Print the user's order history.
pub async fn list(storefront: &Storefront) -> Result<(), ApiError> {
    if !storefront.session.is_authenticated() {
        println!("Please log in to view your orders.");
        return Ok(());
    }

    let orders = storefront.orders.list_orders().await?;

    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in orders {
        println!(
            "Order #{} - {} - ${:.2}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.total_price
        );
        for item in &order.items {
            println!(
                "    {:>3} x {:<32} @ ${}",
                item.quantity, item.product.name, item.price_at_purchase
            );
        }
    }

    Ok(())
}

/// Place an order for the current cart contents.
///
/// Works from a cart snapshot; on success the cart is cleared here, not in
/// the gateway.
pub async fn place(storefront: &Storefront) -> Result<(), ApiError> {
    if !storefront.session.is_authenticated() {
        println!("Please log in to place an order.");
        return Ok(());
    }

    let snapshot = storefront.cart.snapshot();
    let order = storefront.orders.place_order(&snapshot).await?;

    storefront.cart.clear();
    // Stock counts changed server-side; drop stale catalog entries
    storefront.catalog.invalidate_all().await;

    println!(
        "Order #{} placed. {} line(s), total ${:.2}",
        order.id,
        order.items.len(),
        order.total_price
    );

    Ok(())
}
