//! Order repository (read side; orders are written by checkout).

use crunchbox_core::{Order, OrderId};

use super::{MemoryStore, RepositoryError};

/// Repository for placed orders.
pub struct OrderRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// List all orders, newest first.
    pub async fn list(&self) -> Vec<Order> {
        let mut orders = self.store.read().await.orders.clone();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        orders
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    pub async fn get(&self, id: &OrderId) -> Result<Order, RepositoryError> {
        self.store
            .read()
            .await
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
