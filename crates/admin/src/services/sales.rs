//! Sales report.
//!
//! Orders are filtered by an inclusive local date range and optionally by
//! product. Net profit is an estimate: gross revenue times a fixed margin.

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crunchbox_core::{Money, Order, ProductId};

use super::{ReportSettings, sum_revenue};

/// Which orders a report covers. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// First local day included.
    pub start_date: Option<NaiveDate>,
    /// Last local day included.
    pub end_date: Option<NaiveDate>,
    /// Only orders containing this product.
    pub product_id: Option<ProductId>,
}

impl SalesFilter {
    /// Returns `true` if `order` falls inside the filter.
    #[must_use]
    pub fn matches(&self, order: &Order, offset: FixedOffset) -> bool {
        let day = order.placed_at.with_timezone(&offset).date_naive();

        self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
            && self
                .product_id
                .as_ref()
                .is_none_or(|id| order.contains_product(id))
    }
}

/// Units and revenue for one product across a report's orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub flavor: String,
    pub units: u64,
    /// Sum of line totals, before shipping and tax.
    pub revenue: Money,
}

/// Result of running a [`SalesFilter`] over the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    /// Matching orders, newest first.
    pub orders: Vec<Order>,
    /// Sum of matching orders' grand totals.
    pub gross_revenue: Money,
    /// `gross_revenue * profit_margin`, rounded to the currency's minor unit.
    pub net_profit: Money,
    /// Per-product breakdown, best sellers first.
    pub products: Vec<ProductSales>,
}

impl SalesReport {
    /// Build a report from the full order history.
    #[must_use]
    pub fn build(orders: &[Order], filter: &SalesFilter, settings: &ReportSettings) -> Self {
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|order| filter.matches(order, settings.utc_offset))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

        let gross_revenue = sum_revenue(&matching, settings.currency_code);
        let net_profit = Money::new(
            gross_revenue
                .amount
                .saturating_mul(settings.profit_margin)
                .round_dp_with_strategy(
                    settings.currency_code.minor_units(),
                    RoundingStrategy::MidpointAwayFromZero,
                ),
            settings.currency_code,
        );

        let products = product_breakdown(&matching, settings);

        Self {
            orders: matching,
            gross_revenue,
            net_profit,
            products,
        }
    }

    /// Number of matching orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

fn product_breakdown(orders: &[Order], settings: &ReportSettings) -> Vec<ProductSales> {
    let mut by_product: HashMap<&ProductId, ProductSales> = HashMap::new();

    for line in orders.iter().flat_map(|order| &order.lines) {
        if line.unit_price.currency_code != settings.currency_code {
            continue;
        }
        let entry = by_product
            .entry(&line.product_id)
            .or_insert_with(|| ProductSales {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                flavor: line.flavor.clone(),
                units: 0,
                revenue: Money::zero(settings.currency_code),
            });
        entry.units = entry.units.saturating_add(u64::from(line.quantity));
        entry.revenue.amount = entry.revenue.amount.saturating_add(
            line.unit_price
                .amount
                .saturating_mul(Decimal::from(line.quantity)),
        );
    }

    let mut products: Vec<ProductSales> = by_product.into_values().collect();
    products.sort_by(|a, b| {
        b.units
            .cmp(&a.units)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    products
}
