//! Attendance repository.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::{info, instrument};

use crunchbox_core::{AttendanceId, AttendanceStatus, EmployeeId};

use super::{MemoryStore, RepositoryError};
use crate::models::Attendance;

/// Repository for daily attendance records.
pub struct AttendanceRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> AttendanceRepository<'a> {
    /// Create a new attendance repository.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// List all records, newest first.
    pub async fn list(&self) -> Vec<Attendance> {
        let mut records = self.store.read().await.attendance.clone();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        records
    }

    /// Records taken on a local calendar day.
    pub async fn for_day(&self, date: NaiveDate, offset: FixedOffset) -> Vec<Attendance> {
        self.store
            .read()
            .await
            .attendance
            .iter()
            .filter(|a| a.local_date(offset) == date)
            .cloned()
            .collect()
    }

    /// Record attendance for an employee.
    ///
    /// The duplicate check and the insert happen under one write lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee does not exist.
    /// Returns `RepositoryError::Conflict` if the employee already has a
    /// record on the same local day.
    #[instrument(skip(self, employee_id, offset), fields(employee_id = %employee_id))]
    pub async fn record(
        &self,
        employee_id: &EmployeeId,
        status: AttendanceStatus,
        recorded_at: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Attendance, RepositoryError> {
        let mut tables = self.store.write().await;

        let employee_name = tables
            .employees
            .iter()
            .find(|e| &e.id == employee_id)
            .map(|e| e.name.clone())
            .ok_or(RepositoryError::NotFound)?;

        let day = recorded_at.with_timezone(&offset).date_naive();
        if tables
            .attendance
            .iter()
            .any(|a| &a.employee_id == employee_id && a.local_date(offset) == day)
        {
            return Err(RepositoryError::Conflict(format!(
                "{employee_name} already has attendance for {day}"
            )));
        }

        let record = Attendance {
            id: AttendanceId::generate(),
            employee_id: employee_id.clone(),
            employee_name,
            recorded_at,
            status,
        };
        tables.attendance.push(record.clone());

        info!(status = %status, "Attendance recorded");
        Ok(record)
    }
}
