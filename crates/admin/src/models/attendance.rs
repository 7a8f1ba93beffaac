//! Attendance records.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crunchbox_core::{AttendanceId, AttendanceStatus, EmployeeId};

/// One employee's attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Unique record ID.
    pub id: AttendanceId,
    /// Employee the record is for.
    pub employee_id: EmployeeId,
    /// Employee name when the record was taken.
    pub employee_name: String,
    /// When the record was taken.
    pub recorded_at: DateTime<Utc>,
    /// Present, sick or excused.
    pub status: AttendanceStatus,
}

impl Attendance {
    /// Calendar day of the record in the shop's local time.
    #[must_use]
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.recorded_at.with_timezone(&offset).date_naive()
    }
}
