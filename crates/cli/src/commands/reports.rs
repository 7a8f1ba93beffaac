//! Sales and dashboard reports.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crunchbox_admin::db::{OrderRepository, ProductRepository};
use crunchbox_admin::services::{
    DashboardStats, ReportSettings, SalesFilter, SalesReport, daily_revenue,
};
use crunchbox_core::ProductId;

use super::Context;

fn settings(context: &Context) -> ReportSettings {
    ReportSettings::new(&context.admin, context.store.currency_code())
}

/// Log a sales report for the given range and product.
pub async fn sales(
    context: &Context,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    product: Option<String>,
) {
    let filter = SalesFilter {
        start_date: from,
        end_date: to,
        product_id: product.map(ProductId::new),
    };
    let orders = OrderRepository::new(&context.store).list().await;
    let report = SalesReport::build(&orders, &filter, &settings(context));

    info!(
        orders = report.order_count(),
        gross_revenue = %report.gross_revenue.display(),
        net_profit = %report.net_profit.display(),
        "Sales report"
    );

    for product in &report.products {
        info!(
            product_id = %product.product_id,
            units = product.units,
            "{} {}: {}",
            product.name,
            product.flavor,
            product.revenue.display()
        );
    }

    for order in &report.orders {
        info!(
            order_id = %order.id,
            placed_at = %order.placed_at.with_timezone(&context.admin.utc_offset),
            customer = order.customer.name(),
            units = order.unit_count(),
            "{}",
            order.totals.grand_total.display()
        );
    }
}

/// Log dashboard stats and the daily revenue series.
pub async fn dashboard(context: &Context) {
    let settings = settings(context);
    let orders = OrderRepository::new(&context.store).list().await;
    let products = ProductRepository::new(&context.store).list().await;

    let stats = DashboardStats::compute(&orders, &products, Utc::now(), &settings);
    info!(
        total_revenue = %stats.total_revenue.display(),
        revenue_this_month = %stats.revenue_this_month.display(),
        products = stats.product_count,
        low_stock = stats.low_stock_count,
        orders = stats.order_count,
        "Dashboard"
    );

    for day in daily_revenue(&orders, &settings) {
        info!(
            date = %day.date,
            orders = day.order_count,
            "{}",
            day.revenue.display()
        );
    }
}
