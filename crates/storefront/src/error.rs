//! Unified storefront error type.
//!
//! Callers that drive the cart and checkout (a web handler, the CLI) convert
//! module errors into [`StorefrontError`] and use [`StorefrontError::log`] to
//! report them at the right level.

use thiserror::Error;

use crate::cart::StockExceeded;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A cart request exceeded available stock.
    #[error("Stock exceeded: {0}")]
    Stock(#[from] StockExceeded),

    /// Checkout could not complete.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration was invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// Returns `true` for conditions the customer should be told about and
    /// can correct, as opposed to internal failures.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::Stock(_) => true,
            Self::Checkout(err) => err.is_user_facing(),
            Self::Config(_) => false,
        }
    }

    /// Log the error: user-correctable conditions at warn, the rest at error.
    pub fn log(&self) {
        if self.is_user_facing() {
            tracing::warn!(error = %self, "Request could not be completed");
        } else {
            tracing::error!(error = %self, "Storefront error");
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use crunchbox_core::{ProductId, StoreError};

    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::from(StockExceeded {
            product_id: ProductId::new("p3"),
            product_name: "Basreng".to_string(),
            stock: 15,
        });
        assert_eq!(err.to_string(), "Stock exceeded: only 15 of Basreng in stock");

        let err = StorefrontError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cart is empty");
    }

    #[test]
    fn test_storefront_error_classification() {
        assert!(StorefrontError::from(CheckoutError::EmptyCart).is_user_facing());
        assert!(
            !StorefrontError::from(CheckoutError::Store(StoreError::Unavailable(
                "timeout".to_string()
            )))
            .is_user_facing()
        );
        assert!(
            !StorefrontError::from(ConfigError::InvalidEnvVar(
                "SHOP_TAX_RATE".to_string(),
                "bad".to_string()
            ))
            .is_user_facing()
        );
    }
}
