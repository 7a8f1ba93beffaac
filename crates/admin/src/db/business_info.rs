//! Business profile repository.

use tracing::{info, instrument};

use super::{MemoryStore, RepositoryError};
use crate::models::{BusinessInfo, BusinessInfoInput};

/// Repository for the single shop profile.
pub struct BusinessInfoRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> BusinessInfoRepository<'a> {
    /// Create a new business info repository.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Current profile.
    pub async fn get(&self) -> BusinessInfo {
        self.store.read().await.business_info.clone()
    }

    /// Validate and replace the profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the input is invalid; the
    /// stored profile is left unchanged.
    #[instrument(skip(self, input))]
    pub async fn update(&self, input: BusinessInfoInput) -> Result<BusinessInfo, RepositoryError> {
        let profile = input.validate()?;
        self.store.write().await.business_info = profile.clone();

        info!("Business info updated");
        Ok(profile)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_and_get() {
        let store = MemoryStore::default();
        let repo = BusinessInfoRepository::new(&store);

        let updated = repo
            .update(BusinessInfoInput {
                name: "Crunchbox Bandung".to_string(),
                tagline: "Pedasnya pas".to_string(),
                whatsapp_number: "6285700001111".to_string(),
                instagram_url: None,
                tiktok_url: Some("https://www.tiktok.com/@crunchbox".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(repo.get().await, updated);
    }

    #[tokio::test]
    async fn test_invalid_update_keeps_profile() {
        let store = MemoryStore::default();
        let repo = BusinessInfoRepository::new(&store);

        let err = repo
            .update(BusinessInfoInput {
                name: "Crunchbox".to_string(),
                whatsapp_number: "0857".to_string(),
                ..BusinessInfoInput::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Validation(_)));
        assert_eq!(repo.get().await, BusinessInfo::default());
    }
}
