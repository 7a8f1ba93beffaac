//! Daily attendance.
//!
//! Each employee gets at most one record per local calendar day.

use chrono::{DateTime, FixedOffset, Utc};
use thiserror::Error;
use tracing::warn;

use crunchbox_core::{AttendanceStatus, EmployeeId};

use crate::db::{AttendanceRepository, RepositoryError};
use crate::models::{Attendance, Employee};

/// Errors recording attendance.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("{employee_name} already has attendance recorded today")]
    AlreadyRecorded { employee_name: String },

    #[error("unknown employee {0}")]
    UnknownEmployee(EmployeeId),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// Record today's attendance for `employee`.
///
/// # Errors
///
/// Returns `AttendanceError::AlreadyRecorded` if the employee already has a
/// record on the local day of `now`, and `AttendanceError::UnknownEmployee`
/// if they are no longer on staff.
pub async fn record_attendance(
    repo: &AttendanceRepository<'_>,
    employee: &Employee,
    status: AttendanceStatus,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<Attendance, AttendanceError> {
    repo.record(&employee.id, status, now, offset)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                warn!(employee_id = %employee.id, "Attendance already recorded today");
                AttendanceError::AlreadyRecorded {
                    employee_name: employee.name.clone(),
                }
            }
            RepositoryError::NotFound => AttendanceError::UnknownEmployee(employee.id.clone()),
            other => AttendanceError::Repository(other),
        })
}

/// Status an employee has recorded for the local day of `now`, if any.
#[must_use]
pub fn today_status(
    records: &[Attendance],
    employee_id: &EmployeeId,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Option<AttendanceStatus> {
    let today = now.with_timezone(&offset).date_naive();
    records
        .iter()
        .find(|a| &a.employee_id == employee_id && a.local_date(offset) == today)
        .map(|a| a.status)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::db::{EmployeeRepository, MemoryStore, SeedData};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    async fn setup() -> (MemoryStore, Employee) {
        let store = MemoryStore::from_seed(SeedData::default()).unwrap();
        let budi = EmployeeRepository::new(&store)
            .get(&EmployeeId::new("e1"))
            .await
            .unwrap();
        (store, budi)
    }

    #[tokio::test]
    async fn test_one_record_per_local_day() {
        let (store, budi) = setup().await;
        let repo = AttendanceRepository::new(&store);
        // 2026-03-10 08:00 WIB
        let morning = Utc.with_ymd_and_hms(2026, 3, 10, 1, 0, 0).unwrap();

        let record = record_attendance(&repo, &budi, AttendanceStatus::Present, morning, wib())
            .await
            .unwrap();
        assert_eq!(record.employee_name, "Budi Santoso");

        // 2026-03-10 23:00 WIB, same local day
        let late = Utc.with_ymd_and_hms(2026, 3, 10, 16, 0, 0).unwrap();
        let err = record_attendance(&repo, &budi, AttendanceStatus::Sick, late, wib())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AttendanceError::AlreadyRecorded { ref employee_name } if employee_name == "Budi Santoso"
        ));

        // 2026-03-11 00:30 WIB, next local day
        let next = late + Duration::minutes(90);
        record_attendance(&repo, &budi, AttendanceStatus::Excused, next, wib())
            .await
            .unwrap();

        assert_eq!(repo.list().await.len(), 2);
        assert_eq!(
            repo.list().await.first().unwrap().status,
            AttendanceStatus::Excused
        );
    }

    #[tokio::test]
    async fn test_other_employees_unaffected() {
        let (store, budi) = setup().await;
        let siti = EmployeeRepository::new(&store)
            .get(&EmployeeId::new("e2"))
            .await
            .unwrap();
        let repo = AttendanceRepository::new(&store);
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 2, 0, 0).unwrap();

        record_attendance(&repo, &budi, AttendanceStatus::Present, now, wib())
            .await
            .unwrap();
        record_attendance(&repo, &siti, AttendanceStatus::Sick, now, wib())
            .await
            .unwrap();

        let today = repo
            .for_day(now.with_timezone(&wib()).date_naive(), wib())
            .await;
        assert_eq!(today.len(), 2);
        assert_eq!(
            today_status(&today, &siti.id, now, wib()),
            Some(AttendanceStatus::Sick)
        );
        assert_eq!(
            today_status(&today, &siti.id, now + Duration::days(1), wib()),
            None
        );
    }

    #[tokio::test]
    async fn test_unknown_employee() {
        let (store, mut budi) = setup().await;
        budi.id = EmployeeId::new("e404");
        let repo = AttendanceRepository::new(&store);

        let err = record_attendance(&repo, &budi, AttendanceStatus::Present, Utc::now(), wib())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::UnknownEmployee(_)));
    }
}
