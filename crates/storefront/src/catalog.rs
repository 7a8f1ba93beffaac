//! Cached product catalog.
//!
//! Wraps any [`ProductCatalog`] with an in-memory `moka` cache for single
//! product lookups (5-minute TTL by default). Browsing tolerates stale stock;
//! checkout re-reads the uncached catalog before placing an order.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use crunchbox_core::{Product, ProductCatalog, ProductId, StoreError};

/// Default time-to-live for cached products.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

const MAX_CACHED_PRODUCTS: u64 = 1000;

/// A [`ProductCatalog`] that caches product lookups.
#[derive(Clone)]
pub struct CachedCatalog<C> {
    inner: C,
    cache: Cache<ProductId, Product>,
}

impl<C: ProductCatalog> CachedCatalog<C> {
    /// Wrap a catalog, caching products for `ttl`.
    #[must_use]
    pub fn new(inner: C, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CACHED_PRODUCTS)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    /// The wrapped catalog.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Invalidate a cached product (e.g., after an order changed its stock).
    pub async fn invalidate(&self, id: &ProductId) {
        self.cache.invalidate(id).await;
    }

    /// Invalidate all cached products.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

impl<C: ProductCatalog> ProductCatalog for CachedCatalog<C> {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        if let Some(product) = self.cache.get(id).await {
            debug!("Cache hit for product");
            return Ok(Some(product));
        }

        let product = self.inner.product(id).await?;

        // Missing products are not cached so newly added ones show up at once
        if let Some(product) = &product {
            self.cache.insert(id.clone(), product.clone()).await;
        }

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.inner.products().await?;

        for product in &products {
            self.cache.insert(product.id.clone(), product.clone()).await;
        }

        Ok(products)
    }
}
