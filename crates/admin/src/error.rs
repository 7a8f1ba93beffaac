//! Unified error handling for the back office.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::{RepositoryError, SeedError};
use crate::services::AttendanceError;

/// Application-level error type for the back office.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Seed file could not be loaded.
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Attendance could not be recorded.
    #[error(transparent)]
    Attendance(#[from] AttendanceError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for back office operations.
pub type Result<T> = std::result::Result<T, AdminError>;
