//! Dashboard statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crunchbox_core::{Money, Order, Product};

use super::{ReportSettings, sum_revenue};

/// Headline numbers for the admin landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Revenue across all orders.
    pub total_revenue: Money,
    /// Revenue from orders placed in the current local calendar month.
    pub revenue_this_month: Money,
    /// Products at or below their restock threshold.
    pub low_stock_count: usize,
    pub product_count: usize,
    pub order_count: usize,
}

impl DashboardStats {
    /// Compute stats as of `now`.
    #[must_use]
    pub fn compute(
        orders: &[Order],
        products: &[Product],
        now: DateTime<Utc>,
        settings: &ReportSettings,
    ) -> Self {
        let local_now = now.with_timezone(&settings.utc_offset);
        let this_month = orders.iter().filter(|order| {
            let placed = order.placed_at.with_timezone(&settings.utc_offset);
            placed.year() == local_now.year() && placed.month() == local_now.month()
        });

        Self {
            total_revenue: sum_revenue(orders, settings.currency_code),
            revenue_this_month: sum_revenue(this_month, settings.currency_code),
            low_stock_count: products.iter().filter(|p| p.needs_restock()).count(),
            product_count: products.len(),
            order_count: orders.len(),
        }
    }
}

/// Revenue for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Money,
    pub order_count: usize,
}

/// Per-day revenue, oldest day first. Days without orders are omitted.
#[must_use]
pub fn daily_revenue(orders: &[Order], settings: &ReportSettings) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();

    for order in orders
        .iter()
        .filter(|o| o.totals.grand_total.currency_code == settings.currency_code)
    {
        let date = order.placed_at.with_timezone(&settings.utc_offset).date_naive();
        let (revenue, count) = days.entry(date).or_insert((Decimal::ZERO, 0));
        *revenue = revenue.saturating_add(order.totals.grand_total.amount);
        *count += 1;
    }

    days.into_iter()
        .map(|(date, (revenue, order_count))| DailyRevenue {
            date,
            revenue: Money::new(revenue, settings.currency_code),
            order_count,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use crunchbox_core::CurrencyCode;

    use super::*;
    use crate::db::SeedData;
    use crate::services::testing::order;

    fn settings() -> ReportSettings {
        ReportSettings {
            profit_margin: Decimal::new(30, 2),
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
            currency_code: CurrencyCode::IDR,
        }
    }

    fn idr(amount: i64) -> Money {
        Money::whole(amount, CurrencyCode::IDR)
    }

    fn history() -> Vec<Order> {
        vec![
            order("o1", Utc.with_ymd_and_hms(2026, 2, 27, 5, 0, 0).unwrap(), "p1", 1, 15000, 26650),
            // 2026-03-01 01:00 WIB, February 28th in UTC
            order("o2", Utc.with_ymd_and_hms(2026, 2, 28, 18, 0, 0).unwrap(), "p2", 1, 16000, 27760),
            order("o3", Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(), "p4", 2, 10000, 32200),
        ]
    }

    fn products() -> Vec<Product> {
        let tables = SeedData::default().into_tables().unwrap();
        tables.products
    }

    #[test]
    fn test_compute() {
        let now = Utc.with_ymd_and_hms(2026, 3, 15, 2, 0, 0).unwrap();
        let stats = DashboardStats::compute(&history(), &products(), now, &settings());

        assert_eq!(stats.total_revenue, idr(86610));
        assert_eq!(stats.revenue_this_month, idr(59960));
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.product_count, 4);
        assert_eq!(stats.order_count, 3);
    }

    #[test]
    fn test_empty_store() {
        let stats = DashboardStats::compute(&[], &[], Utc::now(), &settings());
        assert!(stats.total_revenue.is_zero());
        assert!(stats.revenue_this_month.is_zero());
        assert_eq!(stats.low_stock_count, 0);
    }

    #[test]
    fn test_daily_revenue_groups_by_local_day() {
        let series = daily_revenue(&history(), &settings());

        assert_eq!(series.len(), 2);
        let first = series.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 2, 27).unwrap());
        assert_eq!(first.revenue, idr(26650));

        let second = series.last().unwrap();
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(second.revenue, idr(59960));
        assert_eq!(second.order_count, 2);
    }
}
