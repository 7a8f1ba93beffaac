//! Collaborator traits for the product catalog and order persistence.
//!
//! The storefront reads products and places orders through these traits; the
//! admin crate provides the in-process implementation. Futures are `Send` so
//! callers can drive them from a multi-threaded tokio runtime.

use std::future::Future;

use thiserror::Error;

use crate::types::{NewOrder, Order, Product, ProductId};

/// Errors reported by catalog and order store implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A line asks for more units than are in stock.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product that ran short.
        product_id: ProductId,
        /// Units requested by the order.
        requested: u32,
        /// Units available when the order was applied.
        available: u32,
    },

    /// The order conflicts with existing data (e.g., duplicate lines).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing service could not be reached or failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to current product data.
pub trait ProductCatalog: Send + Sync {
    /// Look up a single product.
    fn product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, StoreError>> + Send;

    /// List every product.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;
}

/// Order persistence with stock decrement.
///
/// Implementations must be all-or-nothing: either the order is recorded and
/// every line's stock is decremented, or nothing changes.
pub trait OrderStore: Send + Sync {
    /// Record an order and decrement stock for each line.
    fn place_order(&self, order: NewOrder) -> impl Future<Output = Result<Order, StoreError>> + Send;
}
