//! Business logic services for the back office.
//!
//! # Services
//!
//! - `sales` - Filtered sales report with gross revenue and estimated profit
//! - `dashboard` - Headline stats and the daily revenue series
//! - `attendance` - One attendance record per employee per day

pub mod attendance;
pub mod dashboard;
pub mod sales;

use chrono::FixedOffset;
use rust_decimal::Decimal;
use tracing::warn;

use crunchbox_core::{CurrencyCode, Money, Order};

use crate::config::AdminConfig;

pub use attendance::{AttendanceError, record_attendance, today_status};
pub use dashboard::{DailyRevenue, DashboardStats, daily_revenue};
pub use sales::{ProductSales, SalesFilter, SalesReport};

/// Parameters shared by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// Share of gross revenue reported as profit.
    pub profit_margin: Decimal,
    /// Shop's local UTC offset, used to bucket orders into days and months.
    pub utc_offset: FixedOffset,
    /// Currency revenue is summed in.
    pub currency_code: CurrencyCode,
}

impl ReportSettings {
    /// Settings from admin configuration for a store priced in `currency_code`.
    #[must_use]
    pub const fn new(config: &AdminConfig, currency_code: CurrencyCode) -> Self {
        Self {
            profit_margin: config.profit_margin,
            utc_offset: config.utc_offset,
            currency_code,
        }
    }
}

/// Sum order grand totals in `currency_code`.
///
/// Orders in another currency are skipped with a warning.
pub(crate) fn sum_revenue<'a, I>(orders: I, currency_code: CurrencyCode) -> Money
where
    I: IntoIterator<Item = &'a Order>,
{
    let amount = orders
        .into_iter()
        .filter(|order| {
            let matches = order.totals.grand_total.currency_code == currency_code;
            if !matches {
                warn!(order_id = %order.id, "Skipping order in foreign currency");
            }
            matches
        })
        .fold(Decimal::ZERO, |acc, order| {
            acc.saturating_add(order.totals.grand_total.amount)
        });

    Money::new(amount, currency_code)
}
