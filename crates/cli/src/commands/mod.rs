//! Command implementations.

pub mod catalog;
pub mod checkout;
pub mod reports;

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crunchbox_admin::{AdminConfig, AdminError, MemoryStore, SeedData};
use crunchbox_core::{CurrencyCode, ProductId};
use crunchbox_storefront::config::{ConfigError, StorefrontConfig};

/// Errors specific to command handling.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("storefront configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storefront prices in {storefront:?} but the store is seeded in {store:?}")]
    CurrencyMismatch {
        storefront: CurrencyCode,
        store: CurrencyCode,
    },

    #[error("invalid item '{0}': expected <id> or <id>:<quantity>")]
    InvalidItem(String),

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
}

/// Store and configuration shared by all commands.
pub struct Context {
    pub store: MemoryStore,
    pub admin: AdminConfig,
    pub storefront: StorefrontConfig,
}

impl Context {
    /// Load configuration and seed the store.
    ///
    /// `seed` takes precedence over `ADMIN_SEED_FILE`; with neither the
    /// built-in catalog is used.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if configuration is invalid, the seed cannot be
    /// loaded, or the storefront and store disagree on currency.
    pub fn load(seed: Option<PathBuf>) -> Result<Self, CommandError> {
        let admin = AdminConfig::from_env().map_err(AdminError::from)?;
        let storefront = StorefrontConfig::from_env()?;

        let seed_data = match seed.or_else(|| admin.seed_file.clone()) {
            Some(path) => {
                info!(path = %path.display(), "Loading seed file");
                SeedData::from_path(&path).map_err(AdminError::from)?
            }
            None => SeedData::default(),
        };

        let store = MemoryStore::from_seed(seed_data).map_err(AdminError::from)?;

        let storefront_currency = storefront.pricing.currency_code();
        if storefront_currency != store.currency_code() {
            return Err(CommandError::CurrencyMismatch {
                storefront: storefront_currency,
                store: store.currency_code(),
            });
        }

        Ok(Self {
            store,
            admin,
            storefront,
        })
    }
}
