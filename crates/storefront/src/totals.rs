//! Order total calculation.
//!
//! Totals are derived fresh from cart contents on every call:
//!
//! 1. `subtotal = sum(price * quantity)`, where a negative line counts as zero
//! 2. `shipping = flat fee` if the subtotal is positive, otherwise zero
//! 3. `tax = subtotal * tax_rate`, rounded half-up to the currency's minor unit
//! 4. `grand_total = subtotal + shipping + tax`
//!
//! Amounts are summed in the policy's currency. The calculation is total:
//! arithmetic saturates instead of failing, so an empty or absurd cart still
//! yields a result.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crunchbox_core::{CurrencyCode, Money, OrderTotals};

use crate::cart::Cart;

/// Default flat shipping fee in rupiah.
pub const DEFAULT_SHIPPING_FEE: i64 = 10_000;

/// Shipping fee and tax rate applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Flat shipping fee charged for any non-empty order.
    pub shipping_fee: Money,
    /// Tax rate as a fraction (0.11 for 11%).
    pub tax_rate: Decimal,
}

impl PricingPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(shipping_fee: Money, tax_rate: Decimal) -> Self {
        Self {
            shipping_fee,
            tax_rate,
        }
    }

    /// Currency totals are computed in.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.shipping_fee.currency_code
    }
}

impl Default for PricingPolicy {
    /// Rp 10.000 flat shipping and 11% tax.
    fn default() -> Self {
        Self::new(
            Money::whole(DEFAULT_SHIPPING_FEE, CurrencyCode::IDR),
            Decimal::new(11, 2),
        )
    }
}

/// Compute checkout totals for a cart.
#[must_use]
pub fn compute_totals(cart: &Cart, policy: &PricingPolicy) -> OrderTotals {
    compute_totals_for(
        cart.lines()
            .iter()
            .map(|line| (line.product().price, line.quantity())),
        policy,
    )
}

/// Compute checkout totals for `(unit price, quantity)` pairs.
#[must_use]
pub fn compute_totals_for<I>(items: I, policy: &PricingPolicy) -> OrderTotals
where
    I: IntoIterator<Item = (Money, u32)>,
{
    let currency_code = policy.currency_code();

    let subtotal = items.into_iter().fold(Decimal::ZERO, |acc, (price, quantity)| {
        let line = price.amount.saturating_mul(Decimal::from(quantity));
        acc.saturating_add(line.max(Decimal::ZERO))
    });

    let shipping = if subtotal > Decimal::ZERO {
        policy.shipping_fee.amount
    } else {
        Decimal::ZERO
    };

    let tax = subtotal
        .saturating_mul(policy.tax_rate)
        .round_dp_with_strategy(
            currency_code.minor_units(),
            RoundingStrategy::MidpointAwayFromZero,
        );

    let grand_total = subtotal.saturating_add(shipping).saturating_add(tax);

    OrderTotals {
        subtotal: Money::new(subtotal, currency_code),
        shipping: Money::new(shipping, currency_code),
        tax: Money::new(tax, currency_code),
        grand_total: Money::new(grand_total, currency_code),
    }
}
