//! Checkout: turn a cart into a placed order.
//!
//! The flow is:
//!
//! 1. Refuse an empty cart.
//! 2. Validate the customer's name and address.
//! 3. Re-read every product from the catalog. If stock dropped below a line's
//!    quantity or a price changed, the cart is updated and checkout stops so
//!    the customer can confirm the new amounts.
//! 4. Compute totals and hand the order to the [`OrderStore`], which records it
//!    and decrements stock atomically.
//! 5. Clear the cart on success. On failure the cart is left as it was.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crunchbox_core::{
    CustomerInfo, CustomerInfoError, NewOrder, Order, OrderLine, OrderStore, OrderTotals,
    ProductCatalog, ProductId, StoreError,
};

use crate::cart::{Cart, CartLine, CartSession, LineAdjustment};
use crate::totals::{PricingPolicy, compute_totals};

/// Errors that stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Name or address is missing or invalid.
    #[error("invalid customer details: {0}")]
    InvalidCustomer(#[from] CustomerInfoError),

    /// Stock or prices changed since items were added; the cart has been
    /// adjusted.
    #[error("{} item(s) changed, please review your cart", .0.len())]
    CartChanged(Vec<LineAdjustment>),

    /// The order store rejected or failed the order. Nothing was recorded.
    #[error("order could not be placed: {0}")]
    Store(#[from] StoreError),
}

impl CheckoutError {
    /// Returns `true` if the customer can fix the problem themselves.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::EmptyCart | Self::InvalidCustomer(_) | Self::CartChanged(_) => true,
            Self::Store(err) => matches!(
                err,
                StoreError::InsufficientStock { .. } | StoreError::NotFound(_)
            ),
        }
    }
}

/// What the customer is asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Lines as they will be ordered.
    pub lines: Vec<OrderLine>,
    /// Totals that will be charged.
    pub totals: OrderTotals,
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// The order as recorded by the store.
    pub order: Order,
}

/// Checkout service over a catalog and an order store.
#[derive(Debug, Clone)]
pub struct Checkout<C, S> {
    catalog: C,
    store: S,
    policy: PricingPolicy,
}

impl<C: ProductCatalog, S: OrderStore> Checkout<C, S> {
    /// Create a checkout service.
    ///
    /// `catalog` should read current stock (not a cache) since it is used to
    /// re-validate the cart before ordering.
    #[must_use]
    pub const fn new(catalog: C, store: S, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            store,
            policy,
        }
    }

    /// Pricing policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Summarize a cart for the confirmation step.
    #[must_use]
    pub fn preview(&self, cart: &Cart) -> CheckoutSummary {
        CheckoutSummary {
            lines: cart.lines().iter().map(order_line).collect(),
            totals: compute_totals(cart, &self.policy),
        }
    }

    /// Place an order for the session's cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] if there is nothing to buy
    /// - [`CheckoutError::InvalidCustomer`] if name or address is blank
    /// - [`CheckoutError::CartChanged`] if the cart had to be adjusted
    /// - [`CheckoutError::Store`] if the catalog or order store failed
    #[instrument(skip(self, session, name, address), fields(items = session.item_count()))]
    pub async fn place_order(
        &self,
        session: &mut CartSession,
        name: &str,
        address: &str,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if session.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = CustomerInfo::parse(name, address)?;

        let adjustments = self.revalidate(session).await?;
        if !adjustments.is_empty() {
            for adjustment in &adjustments {
                warn!(product_id = %adjustment.product_id, "Cart adjusted at checkout: {adjustment}");
            }
            return Err(CheckoutError::CartChanged(adjustments));
        }

        let summary = self.preview(session.cart());
        let order = self
            .store
            .place_order(NewOrder {
                lines: summary.lines,
                totals: summary.totals,
                customer,
            })
            .await?;

        info!(
            order_id = %order.id,
            grand_total = %order.totals.grand_total,
            "Order placed"
        );

        session.clear();
        Ok(CheckoutReceipt { order })
    }

    /// Apply current catalog data to every line, returning what changed.
    async fn revalidate(
        &self,
        session: &mut CartSession,
    ) -> Result<Vec<LineAdjustment>, StoreError> {
        let ids: Vec<ProductId> = session
            .cart()
            .lines()
            .iter()
            .map(|line| line.product().id.clone())
            .collect();

        let mut adjustments = Vec::new();
        for id in ids {
            let adjustment = match self.catalog.product(&id).await? {
                Some(product) => session.refresh_product(&product),
                None => session.discard_missing(&id),
            };
            adjustments.extend(adjustment);
        }

        Ok(adjustments)
    }
}

fn order_line(line: &CartLine) -> OrderLine {
    let product = line.product();
    OrderLine {
        product_id: product.id.clone(),
        name: product.name.clone(),
        flavor: product.flavor.clone(),
        unit_price: product.price,
        quantity: line.quantity(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use crunchbox_core::{CurrencyCode, Money, OrderId, Product};

    use super::*;
    use crate::cart::AdjustmentKind;

    /// Minimal store: products in a map, orders in a list.
    #[derive(Clone, Default)]
    struct FakeStore {
        products: Arc<Mutex<HashMap<ProductId, Product>>>,
        orders: Arc<Mutex<Vec<Order>>>,
        fail_with: Option<StoreError>,
    }

    impl FakeStore {
        fn with(products: &[Product]) -> Self {
            let store = Self::default();
            for p in products {
                store.products.lock().unwrap().insert(p.id.clone(), p.clone());
            }
            store
        }

        fn set_stock(&self, id: &str, stock: u32) {
            if let Some(p) = self.products.lock().unwrap().get_mut(&ProductId::new(id)) {
                p.stock = stock;
            }
        }

        fn set_price(&self, id: &str, price: i64) {
            if let Some(p) = self.products.lock().unwrap().get_mut(&ProductId::new(id)) {
                p.price = Money::whole(price, CurrencyCode::IDR);
            }
        }
    }

    impl ProductCatalog for FakeStore {
        async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
            Ok(self.products.lock().unwrap().get(id).cloned())
        }

        async fn products(&self) -> Result<Vec<Product>, StoreError> {
            Ok(self.products.lock().unwrap().values().cloned().collect())
        }
    }

    impl OrderStore for FakeStore {
        async fn place_order(&self, order: NewOrder) -> Result<Order, StoreError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let order = Order::from_new(OrderId::generate(), order, Utc::now());
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }
    }

    fn product(id: &str, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Snack {id}"),
            flavor: "Original".to_string(),
            price: Money::whole(price, CurrencyCode::IDR),
            stock,
            min_stock: 5,
            image_url: String::new(),
        }
    }

    fn checkout(store: &FakeStore) -> Checkout<FakeStore, FakeStore> {
        Checkout::new(store.clone(), store.clone(), PricingPolicy::default())
    }

    fn session_with(items: &[(&Product, i64)]) -> CartSession {
        let mut session = CartSession::new();
        for (p, qty) in items {
            session.add_item(p).unwrap();
            session.update_quantity(&p.id, *qty).unwrap();
        }
        session
    }

    #[tokio::test]
    async fn test_place_order_success_clears_cart() {
        let a = product("p1", 15000, 10);
        let b = product("p3", 12000, 10);
        let store = FakeStore::with(&[a.clone(), b.clone()]);
        let mut session = session_with(&[(&a, 2), (&b, 1)]);

        let receipt = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap();

        assert_eq!(
            receipt.order.totals.grand_total,
            Money::whole(56620, CurrencyCode::IDR)
        );
        assert_eq!(receipt.order.lines.len(), 2);
        assert_eq!(receipt.order.customer.name(), "Budi");
        assert!(session.cart().is_empty());
        assert_eq!(store.orders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let store = FakeStore::default();
        let mut session = CartSession::new();

        let err = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(err.is_user_facing());
    }

    #[tokio::test]
    async fn test_missing_customer_details() {
        let a = product("p1", 15000, 10);
        let store = FakeStore::with(&[a.clone()]);
        let mut session = session_with(&[(&a, 1)]);

        let err = checkout(&store)
            .place_order(&mut session, "Budi", "  ")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::InvalidCustomer(CustomerInfoError::EmptyAddress)
        ));
        assert_eq!(session.item_count(), 1);
    }

    #[tokio::test]
    async fn test_stock_drop_clamps_cart_and_stops() {
        let a = product("p1", 15000, 10);
        let b = product("p2", 16000, 10);
        let store = FakeStore::with(&[a.clone(), b.clone()]);
        let mut session = session_with(&[(&a, 6), (&b, 2)]);
        store.set_stock("p1", 4);
        store.set_stock("p2", 0);

        let err = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap_err();

        let CheckoutError::CartChanged(adjustments) = err else {
            panic!("expected CartChanged, got {err:?}");
        };
        assert_eq!(adjustments.len(), 2);
        assert_eq!(
            adjustments[0].kind,
            AdjustmentKind::Clamped { from: 6, to: 4 }
        );
        assert_eq!(adjustments[1].kind, AdjustmentKind::Removed);
        assert_eq!(session.item_count(), 4);
        assert!(store.orders.lock().unwrap().is_empty());

        // Re-confirming with the adjusted cart succeeds
        let receipt = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap();
        assert_eq!(receipt.order.unit_count(), 4);
    }

    #[tokio::test]
    async fn test_price_change_stops_checkout() {
        let a = product("p1", 15000, 10);
        let store = FakeStore::with(&[a.clone()]);
        let mut session = session_with(&[(&a, 2)]);
        store.set_price("p1", 16000);

        let err = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap_err();

        let CheckoutError::CartChanged(adjustments) = err else {
            panic!("expected CartChanged, got {err:?}");
        };
        assert_eq!(
            adjustments.first().unwrap().kind,
            AdjustmentKind::Repriced {
                from: Money::whole(15000, CurrencyCode::IDR),
                to: Money::whole(16000, CurrencyCode::IDR),
            }
        );
        assert_eq!(session.item_count(), 2);
        assert!(store.orders.lock().unwrap().is_empty());

        let receipt = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap();
        assert_eq!(
            receipt.order.totals.subtotal,
            Money::whole(32000, CurrencyCode::IDR)
        );
    }

    #[tokio::test]
    async fn test_store_failure_keeps_cart() {
        let a = product("p1", 15000, 10);
        let mut store = FakeStore::with(&[a.clone()]);
        store.fail_with = Some(StoreError::Unavailable("connection reset".to_string()));
        let mut session = session_with(&[(&a, 3)]);

        let err = checkout(&store)
            .place_order(&mut session, "Budi", "Jl. Merdeka 1")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Store(StoreError::Unavailable(_))));
        assert!(!err.is_user_facing());
        assert_eq!(session.item_count(), 3);
    }

    #[test]
    fn test_preview_matches_cart() {
        let a = product("p1", 15000, 10);
        let store = FakeStore::with(&[a.clone()]);
        let session = session_with(&[(&a, 2)]);

        let summary = checkout(&store).preview(session.cart());

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].quantity, 2);
        assert_eq!(summary.totals.subtotal, Money::whole(30000, CurrencyCode::IDR));
    }
}
