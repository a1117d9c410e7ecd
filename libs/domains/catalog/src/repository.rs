use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter};

/// Repository trait for product persistence.
///
/// Implementations can use different storage backends; the MongoDB
/// implementation lives in [`crate::mongodb`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a fully-built product
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    /// Get a product by id
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products matching a filter, newest first
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        skip: u64,
    ) -> CatalogResult<Vec<Product>>;

    /// Count products matching a filter
    async fn count(&self, filter: &ProductFilter) -> CatalogResult<u64>;

    /// Replace the stored document with this one
    async fn replace(&self, product: &Product) -> CatalogResult<()>;

    /// Delete a product by id; false when nothing matched
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}
