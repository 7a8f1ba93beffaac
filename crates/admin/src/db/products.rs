//! Product repository.

use tracing::{info, instrument};

use crunchbox_core::{Product, ProductId};

use super::{MemoryStore, RepositoryError};
use crate::models::{CreateProductInput, UpdateProductInput};

/// Repository for catalog management.
pub struct ProductRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// List all products in display order.
    pub async fn list(&self) -> Vec<Product> {
        self.store.read().await.products.clone()
    }

    /// Products at or below their restock threshold.
    pub async fn low_stock(&self) -> Vec<Product> {
        self.store
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.needs_restock())
            .cloned()
            .collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    pub async fn get(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.store
            .read()
            .await
            .product(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Create a product with a generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the input is invalid.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateProductInput) -> Result<Product, RepositoryError> {
        let product = input.into_product(ProductId::generate(), self.store.currency_code())?;

        self.store.write().await.products.push(product.clone());

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Validation` if the update is invalid.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: &ProductId,
        input: UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.store.write().await;
        let product = tables.product_mut(id).ok_or(RepositoryError::NotFound)?;

        input.apply(product)?;

        info!("Product updated");
        Ok(product.clone())
    }

    /// Delete a product. Past orders keep their line snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut tables = self.store.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| &p.id != id);

        if tables.products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        info!("Product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crunchbox_core::{CurrencyCode, Money};

    use super::*;
    use crate::db::SeedData;

    fn store() -> MemoryStore {
        MemoryStore::from_seed(SeedData::default()).unwrap()
    }

    #[tokio::test]
    async fn test_list_keeps_seed_order() {
        let store = store();
        let ids: Vec<_> = ProductRepository::new(&store)
            .list()
            .await
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, ["p1", "p2", "p3", "p4"]);
    }

    #[tokio::test]
    async fn test_low_stock() {
        let store = store();
        let low = ProductRepository::new(&store).low_stock().await;
        assert_eq!(low.len(), 1);
        assert_eq!(low.first().unwrap().id.as_str(), "p3");
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = store();
        let repo = ProductRepository::new(&store);

        let created = repo
            .create(CreateProductInput {
                name: "Makaroni".to_string(),
                flavor: "Balado".to_string(),
                price: Money::whole(9000, CurrencyCode::IDR),
                stock: 50,
                min_stock: 10,
                image_url: None,
            })
            .await
            .unwrap();
        assert_eq!(repo.get(&created.id).await.unwrap(), created);

        let updated = repo
            .update(
                &created.id,
                UpdateProductInput {
                    stock: Some(5),
                    ..UpdateProductInput::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.stock, 5);
        assert!(updated.needs_restock());

        repo.delete(&created.id).await.unwrap();
        assert!(matches!(
            repo.get(&created.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let store = store();
        let err = ProductRepository::new(&store)
            .create(CreateProductInput {
                name: String::new(),
                flavor: "Balado".to_string(),
                price: Money::whole(9000, CurrencyCode::IDR),
                stock: 1,
                min_stock: 1,
                image_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert_eq!(store.read().await.products.len(), 4);
    }
}
