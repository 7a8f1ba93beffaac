//! Customer details captured at checkout.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building [`CustomerInfo`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerInfoError {
    /// The name is empty or whitespace.
    #[error("customer name cannot be empty")]
    EmptyName,
    /// The address is empty or whitespace.
    #[error("customer address cannot be empty")]
    EmptyAddress,
    /// A field is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

/// Name and shipping address of the person placing an order.
///
/// ## Constraints
///
/// - Name: 1-120 characters after trimming
/// - Address: 1-500 characters after trimming
///
/// ## Examples
///
/// ```
/// use crunchbox_core::CustomerInfo;
///
/// let customer = CustomerInfo::parse("  Budi ", "Jl. Merdeka 1, Bandung").unwrap();
/// assert_eq!(customer.name(), "Budi");
///
/// assert!(CustomerInfo::parse("", "Jl. Merdeka 1").is_err());
/// assert!(CustomerInfo::parse("Budi", "   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerInfo {
    name: String,
    address: String,
}

impl CustomerInfo {
    /// Maximum length of a customer name.
    pub const MAX_NAME_LENGTH: usize = 120;
    /// Maximum length of a shipping address.
    pub const MAX_ADDRESS_LENGTH: usize = 500;

    /// Validate and build customer details.
    ///
    /// # Errors
    ///
    /// Returns an error if either field is blank or too long.
    pub fn parse(name: &str, address: &str) -> Result<Self, CustomerInfoError> {
        let name = name.trim();
        let address = address.trim();

        if name.is_empty() {
            return Err(CustomerInfoError::EmptyName);
        }
        if address.is_empty() {
            return Err(CustomerInfoError::EmptyAddress);
        }
        if name.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(CustomerInfoError::TooLong {
                field: "name",
                max: Self::MAX_NAME_LENGTH,
            });
        }
        if address.chars().count() > Self::MAX_ADDRESS_LENGTH {
            return Err(CustomerInfoError::TooLong {
                field: "address",
                max: Self::MAX_ADDRESS_LENGTH,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            address: address.to_owned(),
        })
    }

    /// Customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shipping address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let c = CustomerInfo::parse(" Siti ", "\tJl. Asia Afrika 8\n").unwrap();
        assert_eq!(c.name(), "Siti");
        assert_eq!(c.address(), "Jl. Asia Afrika 8");
    }

    #[test]
    fn test_parse_empty_fields() {
        assert_eq!(
            CustomerInfo::parse("   ", "addr"),
            Err(CustomerInfoError::EmptyName)
        );
        assert_eq!(
            CustomerInfo::parse("Siti", ""),
            Err(CustomerInfoError::EmptyAddress)
        );
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(CustomerInfo::MAX_NAME_LENGTH + 1);
        assert!(matches!(
            CustomerInfo::parse(&long, "addr"),
            Err(CustomerInfoError::TooLong { field: "name", .. })
        ));
    }
}
