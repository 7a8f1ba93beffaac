//! Catalog listing.

use tracing::{info, warn};

use crunchbox_core::{ProductCatalog, StockLevel, StoreError};
use crunchbox_storefront::catalog::CachedCatalog;

use super::Context;

/// Log every product with its price and stock level.
///
/// # Errors
///
/// Returns `StoreError` if the catalog cannot be read.
pub async fn list(context: &Context) -> Result<(), StoreError> {
    let catalog = CachedCatalog::new(
        context.store.clone(),
        context.storefront.catalog_cache_ttl,
    );
    let products = catalog.products().await?;

    info!(count = products.len(), "Catalog");
    for product in &products {
        let level = product.stock_level();
        info!(
            id = %product.id,
            stock = product.stock,
            level = %level,
            "{} - {}",
            product.display_name(),
            product.price.display()
        );
        if level != StockLevel::Healthy {
            warn!(id = %product.id, min_stock = product.min_stock, "Needs restock");
        }
    }

    Ok(())
}
