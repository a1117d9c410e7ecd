//! Catalog Domain
//!
//! Product catalog backed by MongoDB: dynamic filter construction over the
//! document schema, pagination, image-field normalization, and the upload
//! collaborator boundary.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, role gating, audit emission
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation, image normalization, upload, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB implementation (filter builder)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← canonical Product, DTOs
//! └─────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod upload;

pub use error::{CatalogError, CatalogResult};
pub use handlers::{ApiDoc, CatalogState, DeleteResponse};
pub use images::{normalize_images, ImageInput};
pub use models::{
    expand_axes, CreateProduct, Gender, Policies, Pricing, PricingInput, Product, ProductFilter,
    ProductImage, ProductPage, Rating, Shipping, UpdateProduct, Variant,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::CatalogService;
pub use upload::{CloudinaryUploader, ImageUploader};
