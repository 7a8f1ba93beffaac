//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_PROFIT_MARGIN` - Share of revenue reported as profit (default: 0.30)
//! - `ADMIN_UTC_OFFSET_HOURS` - Shop's local UTC offset in hours (default: 7, WIB)
//! - `ADMIN_SEED_FILE` - YAML seed file for the store (default: built-in catalog)

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;
const SECONDS_PER_HOUR: i32 = 3600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Back office configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Share of gross revenue reported as net profit
    pub profit_margin: Decimal,
    /// Offset used to bucket orders and attendance into local days
    pub utc_offset: FixedOffset,
    /// Seed file to load instead of the built-in catalog
    pub seed_file: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            profit_margin: Decimal::new(30, 2),
            utc_offset: utc_offset(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix()),
            seed_file: None,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is set but invalid.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let profit_margin = match get("ADMIN_PROFIT_MARGIN") {
            Some(raw) => raw.trim().parse::<Decimal>().map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_PROFIT_MARGIN".to_string(), e.to_string())
            })?,
            None => defaults.profit_margin,
        };
        if profit_margin < Decimal::ZERO || profit_margin > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PROFIT_MARGIN".to_string(),
                format!("must be between 0 and 1 (got {profit_margin})"),
            ));
        }

        let utc_offset = match get("ADMIN_UTC_OFFSET_HOURS") {
            Some(raw) => {
                let hours = raw.trim().parse::<i32>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ADMIN_UTC_OFFSET_HOURS".to_string(), e.to_string())
                })?;
                utc_offset(hours).ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "ADMIN_UTC_OFFSET_HOURS".to_string(),
                        format!("{hours} is not a valid offset"),
                    )
                })?
            }
            None => defaults.utc_offset,
        };

        let seed_file = get("ADMIN_SEED_FILE")
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            profit_margin,
            utc_offset,
            seed_file,
        })
    }
}

fn utc_offset(hours: i32) -> Option<FixedOffset> {
    if !(-12..=14).contains(&hours) {
        return None;
    }
    FixedOffset::east_opt(hours * SECONDS_PER_HOUR)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.profit_margin, Decimal::new(3, 1));
        assert_eq!(config.utc_offset.local_minus_utc(), 7 * 3600);
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ADMIN_PROFIT_MARGIN", "0.25"),
            ("ADMIN_UTC_OFFSET_HOURS", "8"),
            ("ADMIN_SEED_FILE", "seed/demo.yaml"),
        ])
        .unwrap();

        assert_eq!(config.profit_margin, Decimal::new(25, 2));
        assert_eq!(config.utc_offset.local_minus_utc(), 8 * 3600);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed/demo.yaml")));
    }

    #[test]
    fn test_margin_out_of_range() {
        let err = load(&[("ADMIN_PROFIT_MARGIN", "30")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ADMIN_PROFIT_MARGIN"));
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(load(&[("ADMIN_UTC_OFFSET_HOURS", "25")]).is_err());
        assert!(load(&[("ADMIN_UTC_OFFSET_HOURS", "seven")]).is_err());
    }

    #[test]
    fn test_blank_seed_file_ignored() {
        let config = load(&[("ADMIN_SEED_FILE", "  ")]).unwrap();
        assert!(config.seed_file.is_none());
    }
}
