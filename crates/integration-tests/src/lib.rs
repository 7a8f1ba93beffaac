//! Integration tests for Crunchbox.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p crunchbox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Storefront checkout against the back office store
//! - `back_office` - Reports and attendance over orders placed by checkout
//!
//! Everything runs against an in-memory store seeded with the built-in
//! catalog, so no external services are needed.

use crunchbox_admin::{AdminConfig, MemoryStore, SeedData};
use crunchbox_core::{ProductCatalog, ProductId};
use crunchbox_storefront::{CartSession, Checkout, PricingPolicy};

/// A seeded store with a checkout service wired to it.
pub struct TestContext {
    pub store: MemoryStore,
    pub checkout: Checkout<MemoryStore, MemoryStore>,
    pub admin: AdminConfig,
}

impl TestContext {
    /// Context over the built-in seed.
    ///
    /// # Panics
    ///
    /// Panics if the built-in seed is invalid.
    #[must_use]
    pub fn new() -> Self {
        let store = MemoryStore::from_seed(SeedData::default()).expect("built-in seed is valid");
        let checkout = Checkout::new(store.clone(), store.clone(), PricingPolicy::default());

        Self {
            store,
            checkout,
            admin: AdminConfig::default(),
        }
    }

    /// A cart session holding `quantity` of each listed product.
    ///
    /// # Panics
    ///
    /// Panics if a product is unknown or lacks stock.
    pub async fn cart_with(&self, items: &[(&str, u32)]) -> CartSession {
        let mut session = CartSession::new();
        for (id, quantity) in items {
            let id = ProductId::new(*id);
            let product = self
                .store
                .product(&id)
                .await
                .expect("catalog read")
                .expect("product exists");
            for _ in 0..*quantity {
                session.add_item(&product).expect("enough stock");
            }
        }
        session
    }

    /// Current stock of a product.
    ///
    /// # Panics
    ///
    /// Panics if the product does not exist.
    pub async fn stock(&self, id: &str) -> u32 {
        self.store
            .product(&ProductId::new(id))
            .await
            .expect("catalog read")
            .expect("product exists")
            .stock
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
