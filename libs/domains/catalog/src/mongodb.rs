//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductFilter};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
        }
    }

    /// Initialize indexes for the common query shapes
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            // Newest-first listing
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            // Category + active flag for filtered listing
            IndexModel::builder()
                .keys(doc! { "category": 1, "isActive": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_active".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "pricing.sellingPrice": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_selling_price".to_string())
                        .build(),
                )
                .build(),
            // Brand filter
            IndexModel::builder()
                .keys(doc! { "brand": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_brand".to_string())
                        .build(),
                )
                .build(),
            // Variant axis filters
            IndexModel::builder()
                .keys(doc! { "variants.size": 1, "variants.color": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_variant_axes".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("(?i){}", regex::escape(search));
            doc.insert("name", doc! { "$regex": pattern });
        }

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        if let Some(ref brand) = filter.brand {
            doc.insert("brand", brand);
        }

        if let Some(ref gender) = filter.gender {
            doc.insert("gender", gender);
        }

        if let Some(active) = filter.active_filter() {
            doc.insert("isActive", active);
        }

        // A single variant element must satisfy both axes when both are given
        if filter.size.is_some() || filter.color.is_some() {
            let mut variant_match = doc! {};
            if let Some(ref size) = filter.size {
                variant_match.insert("size", size);
            }
            if let Some(ref color) = filter.color {
                variant_match.insert("color", color);
            }
            doc.insert("variants", doc! { "$elemMatch": variant_match });
        }

        // Inclusive bounds on the authoritative selling price
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("pricing.sellingPrice", price_filter);
        }

        doc
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id, product_name = %product.name))]
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self, filter))]
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        skip: u64,
    ) -> CatalogResult<Vec<Product>> {
        let mongo_filter = Self::build_filter(filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .skip(skip)
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let mongo_filter = Self::build_filter(filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> CatalogResult<()> {
        let filter = doc! { "_id": to_bson(&product.id).unwrap_or(Bson::Null) };
        let result = self.collection.replace_one(filter, product).await?;

        if result.matched_count == 0 {
            return Err(CatalogError::NotFound(product.id));
        }

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}
