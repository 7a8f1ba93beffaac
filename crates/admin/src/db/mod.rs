//! In-memory back office store.
//!
//! # Tables
//!
//! - `products` - Catalog with live stock counts (insertion order is display order)
//! - `orders` - Placed orders with frozen line snapshots
//! - `employees` - Staff records
//! - `attendance` - One record per employee per local day
//! - `business_info` - Single-row shop profile
//!
//! All tables sit behind one `tokio::sync::RwLock`. Order placement validates
//! every line and decrements stock inside a single write-lock critical
//! section, so concurrent checkouts can never oversell.

pub mod attendance;
pub mod business_info;
pub mod employees;
pub mod orders;
pub mod products;
pub mod seed;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, instrument, warn};

use crunchbox_core::{
    CurrencyCode, NewOrder, Order, OrderId, OrderStore, Product, ProductCatalog, ProductId,
    StoreError,
};

use crate::models::{Attendance, BusinessInfo, Employee, ValidationError};

pub use attendance::AttendanceRepository;
pub use business_info::BusinessInfoRepository;
pub use employees::EmployeeRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use seed::{SeedData, SeedError};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Stored data is inconsistent (e.g., a seed with a foreign currency).
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate ID).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) employees: Vec<Employee>,
    pub(crate) attendance: Vec<Attendance>,
    pub(crate) business_info: BusinessInfo,
}

impl Tables {
    pub(crate) fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub(crate) fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| &p.id == id)
    }
}

/// Shared handle to the in-memory store.
///
/// Cloning is cheap; all clones see the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    currency_code: CurrencyCode,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(CurrencyCode::default())
    }
}

impl MemoryStore {
    /// Create an empty store pricing everything in `currency_code`.
    #[must_use]
    pub fn new(currency_code: CurrencyCode) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            currency_code,
        }
    }

    /// Create a store populated from seed data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` for duplicate IDs,
    /// `RepositoryError::DataCorruption` for negative or sub-unit product
    /// prices and orders in another currency, and
    /// `RepositoryError::Validation` for an invalid business profile.
    pub fn from_seed(seed: SeedData) -> Result<Self, RepositoryError> {
        let currency_code = seed.currency_code;
        let tables = seed.into_tables()?;

        info!(
            products = tables.products.len(),
            employees = tables.employees.len(),
            orders = tables.orders.len(),
            "Store seeded"
        );

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
            currency_code,
        })
    }

    /// Currency all prices are expressed in.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

impl ProductCatalog for MemoryStore {
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read().await.product(id).cloned())
    }

    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read().await.products.clone())
    }
}

impl OrderStore for MemoryStore {
    #[instrument(skip(self, order), fields(lines = order.lines.len()))]
    async fn place_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tables = self.write().await;
        let placed = place_order_locked(&mut tables, order, Utc::now())?;

        info!(order_id = %placed.id, "Order recorded");
        Ok(placed)
    }
}

/// Validate every line against current stock, then decrement and record.
///
/// Nothing is mutated unless every line passes.
fn place_order_locked(
    tables: &mut Tables,
    order: NewOrder,
    placed_at: DateTime<Utc>,
) -> Result<Order, StoreError> {
    if order.lines.is_empty() {
        return Err(StoreError::Conflict("order has no lines".to_string()));
    }

    let mut seen = HashSet::new();
    for line in &order.lines {
        if !seen.insert(&line.product_id) {
            return Err(StoreError::Conflict(format!(
                "product {} appears on more than one line",
                line.product_id
            )));
        }
        if line.quantity == 0 {
            return Err(StoreError::Conflict(format!(
                "line for {} has zero quantity",
                line.product_id
            )));
        }

        let product = tables
            .product(&line.product_id)
            .ok_or_else(|| StoreError::NotFound(line.product_id.to_string()))?;
        if line.quantity > product.stock {
            warn!(
                product_id = %line.product_id,
                requested = line.quantity,
                available = product.stock,
                "Rejecting order: insufficient stock"
            );
            return Err(StoreError::InsufficientStock {
                product_id: line.product_id.clone(),
                requested: line.quantity,
                available: product.stock,
            });
        }
    }

    for line in &order.lines {
        if let Some(product) = tables.product_mut(&line.product_id) {
            product.stock -= line.quantity;
        }
    }

    let placed = Order::from_new(OrderId::generate(), order, placed_at);
    tables.orders.push(placed.clone());
    Ok(placed)
}
