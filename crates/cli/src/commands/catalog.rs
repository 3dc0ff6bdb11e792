//! Catalog inspection commands.
//!
//! Read-only: these query the hosted backend with the anon key, the same way
//! the storefront does.

use threadline_core::{CurrencyCode, ProductId, recommend};
use threadline_storefront::backend::BackendClient;
use threadline_storefront::config::BackendConfig;

fn client() -> Result<BackendClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = BackendConfig::from_env()?;
    Ok(BackendClient::new(&config)?)
}

/// Print the recommendations the storefront would show for a product.
///
/// # Errors
///
/// Returns an error if the backend is not configured, unreachable, or has no
/// active product with this id.
pub async fn recommendations(id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let product = client.get_product(id).await?;
    let catalog = client.list_active_products().await?;

    let picks = recommend(&product, &catalog);
    tracing::info!(
        product = %product.name,
        catalog_size = catalog.len(),
        picks = picks.len(),
        "Computed recommendations"
    );

    #[allow(clippy::print_stdout)]
    for (rank, pick) in picks.iter().enumerate() {
        println!(
            "{:>2}. #{:<6} {:<40} {}",
            rank + 1,
            pick.id,
            pick.name,
            pick.unit_price(CurrencyCode::default()).display()
        );
    }
    Ok(())
}

/// Print the number of active products per category.
///
/// # Errors
///
/// Returns an error if the backend is not configured or unreachable.
pub async fn summary() -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.list_active_products().await?;
    let categories = client.list_categories().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{} active products", catalog.len());
        for category in categories.iter() {
            let count = catalog
                .iter()
                .filter(|p| p.category_id == Some(category.id))
                .count();
            println!("  {:<30} {count}", category.name);
        }
        let uncategorized = catalog.iter().filter(|p| p.category_id.is_none()).count();
        if uncategorized > 0 {
            println!("  {:<30} {uncategorized}", "(uncategorized)");
        }
    }
    Ok(())
}
