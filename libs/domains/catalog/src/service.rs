//! Catalog Service - business logic layer.
//!
//! Orchestrates validation, image normalization, the upload collaborator,
//! and the repository. Pagination and filtering semantics live here and in
//! the repository's filter builder.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use axum_helpers::Pagination;

use crate::error::{CatalogError, CatalogResult};
use crate::images::normalize_images;
use crate::models::{
    expand_axes, CreateProduct, Product, ProductFilter, ProductImage, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::upload::ImageUploader;

/// Product service providing the catalog operations
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
    uploader: Option<Arc<dyn ImageUploader>>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            uploader: None,
        }
    }

    /// Attach the image upload collaborator
    pub fn with_uploader(mut self, uploader: impl ImageUploader + 'static) -> Self {
        self.uploader = Some(Arc::new(uploader));
        self
    }

    async fn upload_inline(&self, payload: &str) -> CatalogResult<String> {
        let uploader = self
            .uploader
            .as_ref()
            .ok_or(CatalogError::UploadNotConfigured)?;
        uploader.upload(payload).await
    }

    /// List products, newest first.
    ///
    /// The count and the page fetch are issued concurrently; each is
    /// individually consistent against the same filter.
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> CatalogResult<ProductPage> {
        let page = pagination.page();
        let limit = pagination.limit();

        let (items, total) = tokio::try_join!(
            self.repository.list(filter, limit, pagination.skip()),
            self.repository.count(filter),
        )?;

        Ok(ProductPage {
            items,
            page,
            limit,
            total,
            pages: Pagination::page_count(total, limit),
        })
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Create a new product.
    ///
    /// Required fields are checked up front and reported together; nothing
    /// is persisted on failure. An inline image is uploaded first and its
    /// descriptor appended after the normalized incoming sequence.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields(missing));
        }

        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if input.variants.is_some() && (input.sizes.is_some() || input.colors.is_some()) {
            return Err(CatalogError::Validation(
                "variants and flat sizes/colors are mutually exclusive".to_string(),
            ));
        }

        let uploaded = match &input.image {
            Some(payload) => Some(self.upload_inline(payload).await?),
            None => None,
        };

        let mut images = normalize_images(&input.images, &input.name);
        if let Some(url) = uploaded {
            let alt = input
                .image_alt
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| input.name.clone());
            images.push(ProductImage { url, alt });
        }

        let pricing = input
            .resolve_pricing()
            .ok_or_else(|| CatalogError::Validation("a price is required".to_string()))?;

        let variants = match &input.variants {
            Some(variants) => variants.clone(),
            None => expand_axes(
                input.sizes.as_deref().unwrap_or(&[]),
                input.colors.as_deref().unwrap_or(&[]),
                input.stock.unwrap_or(0),
            ),
        };

        let product = Product::new(&input, pricing, variants, images);
        self.repository.insert(product).await
    }

    /// Update an existing product.
    ///
    /// Image semantics: an explicit `images` list replaces the stored one
    /// (normalized); an inline upload is appended to the incoming list, or
    /// to the *stored* sequence when no list was supplied - prior images
    /// are never discarded implicitly.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: UpdateProduct) -> CatalogResult<Product> {
        patch
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let fallback_alt = patch.name.clone().unwrap_or_default();
        let mut images: Option<Vec<ProductImage>> = patch
            .images
            .as_ref()
            .map(|list| normalize_images(list, &fallback_alt));

        if let Some(payload) = &patch.image {
            let url = self.upload_inline(payload).await?;
            let alt = patch
                .image_alt
                .clone()
                .filter(|a| !a.is_empty())
                .or_else(|| patch.name.clone().filter(|n| !n.is_empty()))
                .unwrap_or_default();

            let incoming = patch
                .images
                .as_ref()
                .map(|list| normalize_images(list, &alt))
                .unwrap_or_default();

            if !incoming.is_empty() {
                let mut merged = incoming;
                merged.push(ProductImage { url, alt });
                images = Some(merged);
            } else {
                let alt = if alt.is_empty() {
                    existing.name.clone()
                } else {
                    alt
                };
                let mut merged = existing.images.clone();
                merged.push(ProductImage { url, alt });
                images = Some(merged);
            }
        }

        existing.apply_update(&patch, images);

        // The patched document must still satisfy the create-time rules
        if existing.name.trim().is_empty() {
            return Err(CatalogError::MissingFields(vec!["name"]));
        }
        if existing.category.trim().is_empty() {
            return Err(CatalogError::MissingFields(vec!["category"]));
        }

        self.repository.replace(&existing).await?;
        Ok(existing)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            uploader: self.uploader.clone(),
        }
    }
}
