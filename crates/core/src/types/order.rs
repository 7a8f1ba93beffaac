//! Orders and their monetary totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer::CustomerInfo;
use super::id::{OrderId, ProductId};
use super::money::{CurrencyCode, Money, MoneyError};

/// Monetary breakdown of an order.
///
/// Derived from cart contents; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line price times quantity.
    pub subtotal: Money,
    /// Flat shipping fee (zero for an empty order).
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus shipping plus tax.
    pub grand_total: Money,
}

impl OrderTotals {
    /// All-zero totals in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        let zero = Money::zero(currency_code);
        Self {
            subtotal: zero,
            shipping: zero,
            tax: zero,
            grand_total: zero,
        }
    }
}

/// A purchased product, frozen at the price paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product that was bought.
    pub product_id: ProductId,
    /// Product name at the time of purchase.
    pub name: String,
    /// Flavor at the time of purchase.
    pub flavor: String,
    /// Unit price at the time of purchase.
    pub unit_price: Money,
    /// Units bought.
    pub quantity: u32,
}

impl OrderLine {
    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product does not fit.
    pub fn line_total(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// An order ready to be handed to the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Lines to record and decrement stock for.
    pub lines: Vec<OrderLine>,
    /// Totals computed at checkout.
    pub totals: OrderTotals,
    /// Who placed the order.
    pub customer: CustomerInfo,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Purchased lines.
    pub lines: Vec<OrderLine>,
    /// Totals charged.
    pub totals: OrderTotals,
    /// Who placed the order.
    pub customer: CustomerInfo,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Build a placed order from a new order.
    #[must_use]
    pub fn from_new(id: OrderId, order: NewOrder, placed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            lines: order.lines,
            totals: order.totals,
            customer: order.customer,
            placed_at,
        }
    }

    /// Returns `true` if any line is for the given product.
    #[must_use]
    pub fn contains_product(&self, product_id: &ProductId) -> bool {
        self.lines.iter().any(|line| &line.product_id == product_id)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
