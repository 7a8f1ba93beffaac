//! Product create/update inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crunchbox_core::{CurrencyCode, Money, Product, ProductId};

use super::{ValidationError, required};

/// Placeholder image used when a product is created without one.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/400/300";

/// Restock threshold used when none is given.
pub const DEFAULT_MIN_STOCK: u32 = 10;

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub flavor: String,
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_min_stock")]
    pub min_stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

const fn default_min_stock() -> u32 {
    DEFAULT_MIN_STOCK
}

impl CreateProductInput {
    /// Validate the input and build a product with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or flavor is blank, or the price
    /// is negative, not in `currency_code`, or finer than its minor unit.
    pub fn into_product(
        self,
        id: ProductId,
        currency_code: CurrencyCode,
    ) -> Result<Product, ValidationError> {
        let name = required("name", &self.name)?;
        let flavor = required("flavor", &self.flavor)?;
        validate_price(self.price, currency_code)?;

        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Ok(Product {
            id,
            name,
            flavor,
            price: self.price,
            stock: self.stock,
            min_stock: self.min_stock,
            image_url,
        })
    }
}

/// Partial update of a product. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub flavor: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub min_stock: Option<u32>,
    pub image_url: Option<String>,
}

impl UpdateProductInput {
    /// Apply the update to `product`.
    ///
    /// Nothing is written unless every field validates.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a given field is invalid.
    pub fn apply(self, product: &mut Product) -> Result<(), ValidationError> {
        let name = self.name.as_deref().map(|n| required("name", n)).transpose()?;
        let flavor = self
            .flavor
            .as_deref()
            .map(|f| required("flavor", f))
            .transpose()?;
        if let Some(price) = self.price {
            validate_price(price, product.price.currency_code)?;
        }

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(flavor) = flavor {
            product.flavor = flavor;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url.trim().to_string();
        }

        Ok(())
    }
}

/// Check a unit price against the store currency.
///
/// Prices must be whole minor units so totals never carry fractions the
/// currency cannot represent.
pub(crate) fn validate_price(
    price: Money,
    currency_code: CurrencyCode,
) -> Result<(), ValidationError> {
    if price.amount < Decimal::ZERO {
        return Err(ValidationError::new("price", "must not be negative"));
    }
    if price.currency_code != currency_code {
        return Err(ValidationError::new(
            "price",
            format!("must be in {}", currency_code.code()),
        ));
    }
    if price.amount.normalize().scale() > currency_code.minor_units() {
        return Err(ValidationError::new(
            "price",
            format!(
                "must not be finer than {} decimal place(s)",
                currency_code.minor_units()
            ),
        ));
    }
    Ok(())
}
