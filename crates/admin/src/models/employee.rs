//! Employee models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crunchbox_core::{EmployeeId, Money};

use super::{ValidationError, required};

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee ID.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Monthly base salary.
    pub base_salary: Money,
}

/// Input for creating or replacing an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub position: String,
    pub base_salary: Money,
}

impl EmployeeInput {
    /// Validate the input and build an employee with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or position is blank or the
    /// salary is negative.
    pub fn into_employee(self, id: EmployeeId) -> Result<Employee, ValidationError> {
        let name = required("name", &self.name)?;
        let position = required("position", &self.position)?;
        if self.base_salary.amount < Decimal::ZERO {
            return Err(ValidationError::new("base_salary", "must not be negative"));
        }

        Ok(Employee {
            id,
            name,
            position,
            base_salary: self.base_salary,
        })
    }
}
