//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_CURRENCY` - ISO 4217 currency for prices and totals (default: IDR)
//! - `SHOP_SHIPPING_FEE` - Flat shipping fee in standard units (default: 10000)
//! - `SHOP_TAX_RATE` - Tax rate as a fraction between 0 and 1 (default: 0.11)
//! - `CATALOG_CACHE_TTL_SECS` - Product cache lifetime in seconds (default: 300)

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crunchbox_core::{CurrencyCode, Money};

use crate::totals::PricingPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Shipping fee and tax rate applied at checkout
    pub pricing: PricingPolicy,
    /// How long catalog lookups are cached
    pub catalog_cache_ttl: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            catalog_cache_ttl: crate::catalog::DEFAULT_CACHE_TTL,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed or is out of range.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currency = parse_or_default(&get, "SHOP_CURRENCY", CurrencyCode::IDR)?;

        let shipping_fee = parse_or_default(&get, "SHOP_SHIPPING_FEE", Decimal::from(10_000))?;
        if shipping_fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_SHIPPING_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let tax_rate = parse_or_default(&get, "SHOP_TAX_RATE", Decimal::new(11, 2))?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TAX_RATE".to_string(),
                format!("must be between 0 and 1 (got {tax_rate})"),
            ));
        }

        let ttl_secs = parse_or_default(&get, "CATALOG_CACHE_TTL_SECS", 300_u64)?;

        Ok(Self {
            pricing: PricingPolicy::new(Money::new(shipping_fee, currency), tax_rate),
            catalog_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<F, T>(get: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(
            config.pricing.shipping_fee,
            Money::whole(10_000, CurrencyCode::IDR)
        );
        assert_eq!(config.catalog_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOP_CURRENCY", "usd"),
            ("SHOP_SHIPPING_FEE", "4.99"),
            ("SHOP_TAX_RATE", "0.0825"),
            ("CATALOG_CACHE_TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.pricing.currency_code(), CurrencyCode::USD);
        assert_eq!(config.pricing.tax_rate, Decimal::new(825, 4));
        assert_eq!(config.catalog_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_tax_rate() {
        let err = load(&[("SHOP_TAX_RATE", "11")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOP_TAX_RATE"));
    }

    #[test]
    fn test_negative_shipping_fee() {
        assert!(load(&[("SHOP_SHIPPING_FEE", "-1")]).is_err());
    }

    #[test]
    fn test_unparseable_value() {
        let err = load(&[("CATALOG_CACHE_TTL_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
