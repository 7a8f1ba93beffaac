//! Domain models for the back office.
//!
//! Input types carry their own validation so repositories can reject bad
//! writes before touching the store.

pub mod attendance;
pub mod business_info;
pub mod employee;
pub mod product;

use thiserror::Error;

pub use attendance::Attendance;
pub use business_info::{BusinessInfo, BusinessInfoInput};
pub use employee::{Employee, EmployeeInput};
pub use product::{CreateProductInput, UpdateProductInput};

/// A field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Trim a required text field, rejecting blank values.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}
