//! Non-interactive checkout.
//!
//! Items are added to a fresh cart session. Quantities above stock are
//! clamped with a warning, and if stock or prices changed between preview
//! and placement the adjusted cart is placed on a second attempt.

use tracing::{info, warn};

use crunchbox_core::{ProductCatalog, ProductId};
use crunchbox_storefront::catalog::CachedCatalog;
use crunchbox_storefront::{CartSession, Checkout, CheckoutError, CheckoutSummary};

use super::{CommandError, Context};

/// Place an order for `items` (`<id>` or `<id>:<quantity>`).
///
/// # Errors
///
/// Returns an error if an item is malformed or unknown, or checkout fails.
pub async fn run(
    context: &Context,
    items: &[String],
    name: &str,
    address: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let requests = items
        .iter()
        .map(|item| parse_item(item))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = CachedCatalog::new(
        context.store.clone(),
        context.storefront.catalog_cache_ttl,
    );
    let mut session = CartSession::new();

    for (product_id, quantity) in requests {
        let product = catalog
            .product(&product_id)
            .await?
            .ok_or_else(|| CommandError::UnknownProduct(product_id.clone()))?;

        // Stock problems are logged by the session and leave the cart clamped
        if session.add_item(&product).is_ok() && quantity > 1 {
            session
                .update_quantity(&product_id, i64::from(quantity))
                .ok();
        }
    }

    // Checkout re-reads the store directly rather than the cache
    let checkout = Checkout::new(
        context.store.clone(),
        context.store.clone(),
        context.storefront.pricing,
    );

    log_summary(&checkout.preview(session.cart()));

    let receipt = match checkout.place_order(&mut session, name, address).await {
        Err(CheckoutError::CartChanged(adjustments)) => {
            for adjustment in &adjustments {
                warn!("{adjustment}");
            }
            log_summary(&checkout.preview(session.cart()));
            checkout.place_order(&mut session, name, address).await?
        }
        result => result?,
    };

    info!(
        order_id = %receipt.order.id,
        customer = receipt.order.customer.name(),
        "Order placed: {}",
        receipt.order.totals.grand_total.display()
    );

    Ok(())
}

fn log_summary(summary: &CheckoutSummary) {
    for line in &summary.lines {
        info!(
            product_id = %line.product_id,
            "{} {} x{} @ {}",
            line.name,
            line.flavor,
            line.quantity,
            line.unit_price.display()
        );
    }

    let totals = &summary.totals;
    info!(
        subtotal = %totals.subtotal.display(),
        shipping = %totals.shipping.display(),
        tax = %totals.tax.display(),
        "Total: {}",
        totals.grand_total.display()
    );
}

/// Parse `<id>` or `<id>:<quantity>`; quantity defaults to 1.
fn parse_item(item: &str) -> Result<(ProductId, u32), CommandError> {
    let invalid = || CommandError::InvalidItem(item.to_string());

    let (id, quantity) = match item.split_once(':') {
        Some((id, quantity)) => (id, quantity.trim().parse::<u32>().map_err(|_| invalid())?),
        None => (item, 1),
    };

    let id = id.trim();
    if id.is_empty() || quantity == 0 {
        return Err(invalid());
    }

    Ok((ProductId::new(id), quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("p1").unwrap(), (ProductId::new("p1"), 1));
        assert_eq!(parse_item("p3:4").unwrap(), (ProductId::new("p3"), 4));
        assert_eq!(parse_item(" p2 : 2").unwrap(), (ProductId::new("p2"), 2));
    }

    #[test]
    fn test_parse_item_rejects_garbage() {
        assert!(parse_item("").is_err());
        assert!(parse_item(":3").is_err());
        assert!(parse_item("p1:0").is_err());
        assert!(parse_item("p1:-2").is_err());
        assert!(parse_item("p1:lots").is_err());
    }
}
