//! Type-safe money representation using decimal arithmetic.
//!
//! Amounts are stored in the currency's standard unit (rupiah, dollars) as a
//! [`Decimal`], never as floating point. Rounding happens only when a value is
//! explicitly brought back to the currency's minor unit.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors from money arithmetic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Two amounts in different currencies were combined.
    #[error("currency mismatch: {left:?} vs {right:?}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: CurrencyCode,
        /// Currency of the right operand.
        right: CurrencyCode,
    },
    /// The result does not fit in a decimal.
    #[error("amount overflow")]
    Overflow,
}

/// An amount of money in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., rupiah, not sen).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whole units of the given currency (e.g., `Money::whole(15000, IDR)`).
    #[must_use]
    pub fn whole(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(units), currency_code)
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Multiply by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product does not fit.
    pub fn times(self, quantity: u32) -> Result<Self, MoneyError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency_code))
    }

    /// Multiply by a rate (e.g., a tax rate) without rounding.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product does not fit.
    pub fn scale(self, rate: Decimal) -> Result<Self, MoneyError> {
        let amount = self
            .amount
            .checked_mul(rate)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency_code))
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] for different currencies and
    /// [`MoneyError::Overflow`] if the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        if self.currency_code != other.currency_code {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency_code,
                right: other.currency_code,
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency_code))
    }

    /// Round to the currency's smallest unit, half-up.
    ///
    /// Uses midpoint-away-from-zero, which is half-up for the non-negative
    /// amounts a storefront deals in.
    #[must_use]
    pub fn round_to_minor(self) -> Self {
        let amount = self.amount.round_dp_with_strategy(
            self.currency_code.minor_units(),
            RoundingStrategy::MidpointAwayFromZero,
        );
        Self::new(amount, self.currency_code)
    }

    /// Format for display (e.g., "Rp 15.000" or "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.round_to_minor();
        let dp = self.currency_code.minor_units();
        let text = format!("{:.*}", dp as usize, rounded.amount.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let grouped = group_thousands(whole, self.currency_code.group_separator());
        let sign = if rounded.amount.is_sign_negative() && !rounded.amount.is_zero() {
            "-"
        } else {
            ""
        };
        let symbol = self.currency_code.symbol();

        if fraction.is_empty() {
            format!("{sign}{symbol}{grouped}")
        } else {
            format!(
                "{sign}{symbol}{grouped}{}{fraction}",
                self.currency_code.decimal_separator()
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    IDR,
    USD,
    EUR,
    SGD,
    MYR,
}

impl CurrencyCode {
    /// Number of decimal places kept after rounding.
    ///
    /// Rupiah is priced in whole units in practice, so it rounds to 0 places.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::IDR => 0,
            Self::USD | Self::EUR | Self::SGD | Self::MYR => 2,
        }
    }

    /// Display symbol, including any trailing space.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::IDR => "Rp ",
            Self::USD => "$",
            Self::EUR => "€",
            Self::SGD => "S$",
            Self::MYR => "RM ",
        }
    }

    /// ISO code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::IDR => "IDR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::SGD => "SGD",
            Self::MYR => "MYR",
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::IDR | Self::EUR => '.',
            Self::USD | Self::SGD | Self::MYR => ',',
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::IDR | Self::EUR => ',',
            Self::USD | Self::SGD | Self::MYR => '.',
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IDR" => Ok(Self::IDR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "SGD" => Ok(Self::SGD),
            "MYR" => Ok(Self::MYR),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_times_and_add() {
        let price = Money::whole(15000, CurrencyCode::IDR);
        let line = price.times(2).unwrap();
        let total = line.checked_add(Money::whole(12000, CurrencyCode::IDR)).unwrap();
        assert_eq!(total, Money::whole(42000, CurrencyCode::IDR));
    }

    #[test]
    fn test_add_currency_mismatch() {
        let err = Money::whole(1, CurrencyCode::IDR)
            .checked_add(Money::whole(1, CurrencyCode::USD))
            .unwrap_err();
        assert!(matches!(err, MoneyError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_round_half_up_idr() {
        let m = Money::new(Decimal::from_str("1649.5").unwrap(), CurrencyCode::IDR);
        assert_eq!(m.round_to_minor().amount, Decimal::from(1650));

        let m = Money::new(Decimal::from_str("1649.49").unwrap(), CurrencyCode::IDR);
        assert_eq!(m.round_to_minor().amount, Decimal::from(1649));
    }

    #[test]
    fn test_round_half_up_usd() {
        let m = Money::new(Decimal::from_str("2.195").unwrap(), CurrencyCode::USD);
        assert_eq!(m.round_to_minor().amount, Decimal::from_str("2.20").unwrap());
    }

    #[test]
    fn test_display_idr() {
        assert_eq!(Money::whole(15000, CurrencyCode::IDR).display(), "Rp 15.000");
        assert_eq!(Money::whole(1_234_567, CurrencyCode::IDR).display(), "Rp 1.234.567");
        assert_eq!(Money::zero(CurrencyCode::IDR).display(), "Rp 0");
    }

    #[test]
    fn test_display_usd() {
        let m = Money::new(Decimal::from_str("1999.5").unwrap(), CurrencyCode::USD);
        assert_eq!(m.display(), "$1,999.50");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(CurrencyCode::from_str("idr").unwrap(), CurrencyCode::IDR);
        assert!(CurrencyCode::from_str("XYZ").is_err());
    }
}
