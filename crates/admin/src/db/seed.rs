//! Seed data for the in-memory store.
//!
//! Seeds are plain YAML. Prices are written as bare amounts in the seed's
//! `currency_code`:
//!
//! ```yaml
//! currency_code: IDR
//! products:
//!   - id: p1
//!     name: Cococrunch
//!     flavor: Cokelat Original
//!     price: 15000
//!     stock: 120
//!     min_stock: 20
//! employees:
//!   - id: e1
//!     name: Budi Santoso
//!     position: Manajer Produksi
//!     base_salary: 5000000
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crunchbox_core::{CurrencyCode, EmployeeId, Money, Order, Product, ProductId};

use super::{RepositoryError, Tables};
use crate::models::product::{DEFAULT_IMAGE_URL, DEFAULT_MIN_STOCK, validate_price};
use crate::models::{Attendance, BusinessInfo, BusinessInfoInput, Employee};

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A product as written in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedProduct {
    pub id: ProductId,
    pub name: String,
    pub flavor: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default = "default_min_stock")]
    pub min_stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

const fn default_min_stock() -> u32 {
    DEFAULT_MIN_STOCK
}

/// An employee as written in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub position: String,
    pub base_salary: Decimal,
}

/// Initial contents of a [`MemoryStore`](super::MemoryStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub currency_code: CurrencyCode,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub attendance: Vec<Attendance>,
    #[serde(default)]
    pub business_info: Option<BusinessInfoInput>,
}

impl SeedData {
    /// Parse seed data from YAML.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Yaml` if the document does not match the seed
    /// format.
    pub fn from_yaml(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML seed file.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Io` if the file cannot be read and
    /// `SeedError::Yaml` if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Build store tables, checking IDs, prices and currencies.
    pub(crate) fn into_tables(self) -> Result<Tables, RepositoryError> {
        let currency_code = self.currency_code;

        let mut product_ids = HashSet::new();
        let mut products = Vec::with_capacity(self.products.len());
        for seed in self.products {
            if !product_ids.insert(seed.id.clone()) {
                return Err(RepositoryError::Conflict(format!(
                    "duplicate product id {}",
                    seed.id
                )));
            }
            let price = Money::new(seed.price, currency_code);
            validate_price(price, currency_code).map_err(|e| {
                RepositoryError::DataCorruption(format!("product {}: {e}", seed.id))
            })?;
            products.push(Product {
                id: seed.id,
                name: seed.name,
                flavor: seed.flavor,
                price,
                stock: seed.stock,
                min_stock: seed.min_stock,
                image_url: seed
                    .image_url
                    .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            });
        }

        let mut employee_ids = HashSet::new();
        let mut employees = Vec::with_capacity(self.employees.len());
        for seed in self.employees {
            if !employee_ids.insert(seed.id.clone()) {
                return Err(RepositoryError::Conflict(format!(
                    "duplicate employee id {}",
                    seed.id
                )));
            }
            employees.push(Employee {
                id: seed.id,
                name: seed.name,
                position: seed.position,
                base_salary: Money::new(seed.base_salary, currency_code),
            });
        }

        if let Some(order) = self
            .orders
            .iter()
            .find(|o| o.totals.grand_total.currency_code != currency_code)
        {
            return Err(RepositoryError::DataCorruption(format!(
                "order {} is not in {}",
                order.id,
                currency_code.code()
            )));
        }

        let business_info = self
            .business_info
            .map(BusinessInfoInput::validate)
            .transpose()?
            .unwrap_or_default();

        Ok(Tables {
            products,
            orders: self.orders,
            employees,
            attendance: self.attendance,
            business_info,
        })
    }
}

impl Default for SeedData {
    /// The launch catalog: four snacks and two staff members.
    fn default() -> Self {
        let product = |id: &str, name: &str, flavor: &str, price: i64, stock: u32, min_stock: u32| {
            SeedProduct {
                id: ProductId::new(id),
                name: name.to_string(),
                flavor: flavor.to_string(),
                price: Decimal::from(price),
                stock,
                min_stock,
                image_url: Some(format!("https://picsum.photos/seed/{id}/400/300")),
            }
        };
        let employee = |id: &str, name: &str, position: &str, salary: i64| SeedEmployee {
            id: EmployeeId::new(id),
            name: name.to_string(),
            position: position.to_string(),
            base_salary: Decimal::from(salary),
        };

        Self {
            currency_code: CurrencyCode::IDR,
            products: vec![
                product("p1", "Cococrunch", "Cokelat Original", 15_000, 120, 20),
                product("p2", "Cococrunch", "Strawberry", 16_000, 80, 20),
                product("p3", "Basreng", "Pedas Daun Jeruk", 12_000, 15, 25),
                product("p4", "Basreng", "Original Asin", 10_000, 200, 25),
            ],
            employees: vec![
                employee("e1", "Budi Santoso", "Manajer Produksi", 5_000_000),
                employee("e2", "Siti Aminah", "Staf Pemasaran", 4_000_000),
            ],
            orders: Vec::new(),
            attendance: Vec::new(),
            business_info: Some(BusinessInfo::default().into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let tables = SeedData::default().into_tables().unwrap();
        assert_eq!(tables.products.len(), 4);
        assert_eq!(tables.employees.len(), 2);

        let basreng = tables.product(&ProductId::new("p3")).unwrap();
        assert_eq!(basreng.price, Money::whole(12_000, CurrencyCode::IDR));
        assert!(basreng.needs_restock());
    }

    #[test]
    fn test_from_yaml() {
        let seed = SeedData::from_yaml(
            r"
currency_code: USD
products:
  - id: chips
    name: Kettle Chips
    flavor: Sea Salt
    price: '2.49'
    stock: 30
employees:
  - id: e9
    name: Ana
    position: Packer
    base_salary: 2100
business_info:
  name: Crunchbox US
  whatsapp_number: '62 811 000 111'
",
        )
        .unwrap();

        assert_eq!(seed.currency_code, CurrencyCode::USD);
        let tables = seed.into_tables().unwrap();
        let chips = tables.product(&ProductId::new("chips")).unwrap();
        assert_eq!(chips.price.amount, Decimal::new(249, 2));
        assert_eq!(chips.min_stock, DEFAULT_MIN_STOCK);
        assert_eq!(chips.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(tables.business_info.whatsapp_number, "62811000111");
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let mut seed = SeedData::default();
        let first = seed.products.first().cloned().unwrap();
        seed.products.push(first);

        assert!(matches!(
            seed.into_tables(),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_sub_unit_price_rejected() {
        let mut seed = SeedData::default();
        if let Some(first) = seed.products.first_mut() {
            first.price = Decimal::new(1_500_025, 2);
        }

        let err = seed.into_tables().unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(ref m) if m.contains("p1")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut seed = SeedData::default();
        if let Some(first) = seed.products.first_mut() {
            first.price = Decimal::from(-12_000);
        }

        assert!(matches!(
            seed.into_tables(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            SeedData::from_yaml("products: 12"),
            Err(SeedError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SeedData::from_path(Path::new("/nonexistent/seed.yaml")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
