//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Daily attendance status for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// At work.
    Present,
    /// Off sick.
    Sick,
    /// Excused absence.
    Excused,
}

impl AttendanceStatus {
    /// Returns `true` if the employee was at work.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Sick => write!(f, "sick"),
            Self::Excused => write!(f, "excused"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "sick" => Ok(Self::Sick),
            "excused" => Ok(Self::Excused),
            _ => Err(format!("invalid attendance status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_attendance_status_round_trips_through_display() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Sick,
            AttendanceStatus::Excused,
        ] {
            assert_eq!(AttendanceStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn test_attendance_status_rejects_unknown() {
        assert!(AttendanceStatus::from_str("holiday").is_err());
    }
}
