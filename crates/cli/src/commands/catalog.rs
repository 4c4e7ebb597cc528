//! Catalog browsing commands.

use shopfront_client::error::ApiError;
use shopfront_core::ProductId;

use super::Storefront;

/// Print the product catalog as a table.
pub async fn list_products(storefront: &Storefront) -> Result<(), ApiError> {
    let products = storefront.catalog.list_products().await?;

    if products.is_empty() {
        println!("No products available.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<32} {:>10} {:>7}  {}",
        "ID", "NAME", "PRICE", "STOCK", "CATEGORY"
    );
    for product in products {
        println!(
            "{:>5}  {:<32} {:>10} {:>7}  {}",
            product.id,
            product.name,
            format!("${}", product.price),
            product.stock,
            product.category.name
        );
    }

    Ok(())
}

/// Print one product in detail.
pub async fn show_product(storefront: &Storefront, product_id: ProductId) -> Result<(), ApiError> {
    let product = storefront.catalog.get_product(product_id).await?;

    println!("{} (#{})", product.name, product.id);
    println!("  Price:    ${}", product.price);
    println!("  Stock:    {}", product.stock);
    println!("  Category: {}", product.category.name);
    if let Some(image_url) = &product.image_url {
        println!("  Image:    {image_url}");
    }
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }

    Ok(())
}

/// Print the category list.
pub async fn list_categories(storefront: &Storefront) -> Result<(), ApiError> {
    let categories = storefront.catalog.list_categories().await?;

    if categories.is_empty() {
        println!("No categories defined.");
        return Ok(());
    }

    for category in categories {
        println!("{:>5}  {:<24} ({})", category.id, category.name, category.slug);
    }

    Ok(())
}
