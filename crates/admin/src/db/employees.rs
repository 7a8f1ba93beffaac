//! Employee repository.

use tracing::{info, instrument};

use crunchbox_core::EmployeeId;

use super::{MemoryStore, RepositoryError};
use crate::models::{Employee, EmployeeInput};

/// Repository for staff records.
pub struct EmployeeRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// List all employees.
    pub async fn list(&self) -> Vec<Employee> {
        self.store.read().await.employees.clone()
    }

    /// Get an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no employee has this ID.
    pub async fn get(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        self.store
            .read()
            .await
            .employees
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Create an employee with a generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the input is invalid.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, RepositoryError> {
        let employee = input.into_employee(EmployeeId::generate())?;

        self.store.write().await.employees.push(employee.clone());

        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Replace an employee's details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee does not exist.
    /// Returns `RepositoryError::Validation` if the input is invalid.
    #[instrument(skip(self, input), fields(employee_id = %id))]
    pub async fn update(
        &self,
        id: &EmployeeId,
        input: EmployeeInput,
    ) -> Result<Employee, RepositoryError> {
        let updated = input.into_employee(id.clone())?;

        let mut tables = self.store.write().await;
        let employee = tables
            .employees
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or(RepositoryError::NotFound)?;
        *employee = updated.clone();

        info!("Employee updated");
        Ok(updated)
    }

    /// Delete an employee. Attendance history is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee does not exist.
    #[instrument(skip(self), fields(employee_id = %id))]
    pub async fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut tables = self.store.write().await;
        let before = tables.employees.len();
        tables.employees.retain(|e| &e.id != id);

        if tables.employees.len() == before {
            return Err(RepositoryError::NotFound);
        }

        info!("Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crunchbox_core::{CurrencyCode, Money};

    use super::*;
    use crate::db::SeedData;

    fn input(name: &str) -> EmployeeInput {
        EmployeeInput {
            name: name.to_string(),
            position: "Staf Gudang".to_string(),
            base_salary: Money::whole(3_500_000, CurrencyCode::IDR),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let store = MemoryStore::from_seed(SeedData::default()).unwrap();
        let repo = EmployeeRepository::new(&store);
        assert_eq!(repo.list().await.len(), 2);

        let created = repo.create(input("Dewi")).await.unwrap();
        assert!(created.id.as_str().starts_with('e'));

        let updated = repo.update(&created.id, input("Dewi Lestari")).await.unwrap();
        assert_eq!(repo.get(&created.id).await.unwrap(), updated);

        repo.delete(&created.id).await.unwrap();
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_employee() {
        let store = MemoryStore::default();
        let err = EmployeeRepository::new(&store)
            .update(&EmployeeId::new("e404"), input("Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
