//! Product catalog entries.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::money::Money;

/// A sellable product variant.
///
/// Products are owned by the catalog; the cart only ever holds snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name (e.g., "Cococrunch").
    pub name: String,
    /// Flavor or variant label (e.g., "Strawberry").
    pub flavor: String,
    /// Unit price.
    pub price: Money,
    /// Units currently available.
    pub stock: u32,
    /// Threshold at or below which the product counts as low on stock.
    pub min_stock: u32,
    /// Image URL.
    pub image_url: String,
}

impl Product {
    /// Classify the current stock against the minimum-stock threshold.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        if self.stock == 0 {
            StockLevel::OutOfStock
        } else if self.stock <= self.min_stock {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }

    /// Returns `true` if at least one unit can be sold.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Returns `true` if the product needs restocking (out of stock or low).
    #[must_use]
    pub const fn needs_restock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Name and flavor for display, e.g. "Basreng (Original Asin)".
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.flavor.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.flavor)
        }
    }
}

/// Display classification of a product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// No units left.
    OutOfStock,
    /// At or below the minimum-stock threshold.
    Low,
    /// Above the threshold.
    Healthy,
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfStock => write!(f, "out_of_stock"),
            Self::Low => write!(f, "low"),
            Self::Healthy => write!(f, "healthy"),
        }
    }
}
