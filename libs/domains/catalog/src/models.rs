use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::images::ImageInput;

/// Intended audience for a product
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
    #[default]
    Unisex,
    Kids,
}

/// Price information.
///
/// `selling_price` is the single authoritative sellable price; every price
/// filter binds to it. `mrp` is the optional list price shown struck
/// through in storefronts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default)]
    pub mrp: Option<f64>,
    pub selling_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub tax_percent: f64,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// One sellable variant along the size/color axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Variant {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Hosted product image. `url` is never empty once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// Aggregated review rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    #[validate(range(min = 0.0, max = 5.0))]
    pub average: f64,
    #[validate(range(min = 0))]
    pub count: i64,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            average: 0.0,
            count: 0,
        }
    }
}

/// Shipping characteristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipping {
    #[validate(range(min = 0.0))]
    pub weight: f64,
    pub weight_unit: String,
    #[serde(rename = "isCODAvailable")]
    pub is_cod_available: bool,
}

impl Default for Shipping {
    fn default() -> Self {
        Self {
            weight: 0.0,
            weight_unit: "g".to_string(),
            is_cod_available: false,
        }
    }
}

/// Return policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Policies {
    pub returnable: bool,
    #[validate(range(min = 0))]
    pub return_days: i64,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            returnable: false,
            return_days: 0,
        }
    }
}

/// Product entity - the canonical catalog document stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    pub pricing: Pricing,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub shipping: Shipping,
    #[serde(default)]
    pub policies: Policies,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Structured pricing as supplied by the client.
///
/// Fields stay optional so a missing one is reported by name instead of
/// failing body deserialization wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    #[validate(range(min = 0.0))]
    pub mrp: Option<f64>,
    #[validate(range(min = 0.0))]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub tax_percent: Option<f64>,
}

/// DTO for creating a new product.
///
/// Accepts both observed client shapes: a flat `price` or a structured
/// `pricing` block, and structured `variants` or flat `sizes`/`colors`
/// axes with a shared `stock`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    /// Flat price form: maps to `pricing.sellingPrice` with no list price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub pricing: Option<PricingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub variants: Option<Vec<Variant>>,
    /// Flat variant axes, mutually exclusive with `variants`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[serde(default)]
    pub images: Vec<ImageInput>,
    /// Inline image payload handed to the upload provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub shipping: Option<Shipping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub policies: Option<Policies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateProduct {
    /// Required fields the caller did not supply, reported together.
    ///
    /// A price is required in one of its two forms; when the structured
    /// block is used, both `mrp` and `sellingPrice` must be present.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }

        match (&self.price, &self.pricing) {
            (Some(_), _) => {}
            (None, Some(p)) => {
                if p.mrp.is_none() {
                    missing.push("pricing.mrp");
                }
                if p.selling_price.is_none() {
                    missing.push("pricing.sellingPrice");
                }
            }
            (None, None) => {
                missing.push("pricing.mrp");
                missing.push("pricing.sellingPrice");
            }
        }

        missing
    }

    /// Resolve the supplied price form into the canonical [`Pricing`].
    ///
    /// Returns `None` when no usable price was supplied (callers check
    /// [`Self::missing_fields`] first).
    pub fn resolve_pricing(&self) -> Option<Pricing> {
        if let Some(p) = &self.pricing {
            return Some(Pricing {
                mrp: p.mrp,
                selling_price: p.selling_price?,
                currency: p.currency.clone().unwrap_or_else(default_currency),
                tax_percent: p.tax_percent.unwrap_or(0.0),
            });
        }

        self.price.map(|price| Pricing {
            mrp: None,
            selling_price: price,
            currency: default_currency(),
            tax_percent: 0.0,
        })
    }
}

/// Expand flat `sizes`/`colors` axes into structured variants.
///
/// The flat schema tracked one shared stock pool, so every synthesized
/// variant carries that value; an absent axis contributes a single open
/// slot.
pub fn expand_axes(sizes: &[String], colors: &[String], stock: i32) -> Vec<Variant> {
    let size_axis: Vec<Option<&String>> = if sizes.is_empty() {
        vec![None]
    } else {
        sizes.iter().map(Some).collect()
    };
    let color_axis: Vec<Option<&String>> = if colors.is_empty() {
        vec![None]
    } else {
        colors.iter().map(Some).collect()
    };

    let mut variants = Vec::new();
    for size in size_axis.iter().copied() {
        for color in color_axis.iter().copied() {
            if size.is_none() && color.is_none() {
                continue;
            }
            variants.push(Variant {
                sku: None,
                size: size.cloned(),
                color: color.cloned(),
                stock,
                price: None,
            });
        }
    }
    variants
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Flat price form: updates `pricing.sellingPrice`, keeps the list price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub pricing: Option<PricingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub variants: Option<Vec<Variant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageInput>>,
    /// Inline image payload handed to the upload provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub shipping: Option<Shipping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub policies: Option<Policies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Product {
    /// Build a new product from validated create input and its resolved
    /// pricing/variants/images.
    pub fn new(
        input: &CreateProduct,
        pricing: Pricing,
        variants: Vec<Variant>,
        images: Vec<ProductImage>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            category: input.category.trim().to_string(),
            brand: input.brand.clone(),
            material: input.material.clone(),
            gender: input.gender,
            pricing,
            variants,
            images,
            tags: input.tags.clone(),
            rating: input.rating.clone().unwrap_or_default(),
            shipping: input.shipping.clone().unwrap_or_default(),
            policies: input.policies.clone().unwrap_or_default(),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into the stored document.
    ///
    /// `images` carries the already-normalized (and possibly upload-merged)
    /// sequence; `None` leaves the stored images untouched.
    pub fn apply_update(&mut self, update: &UpdateProduct, images: Option<Vec<ProductImage>>) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.trim().to_string();
        }
        if let Some(brand) = &update.brand {
            self.brand = Some(brand.clone());
        }
        if let Some(material) = &update.material {
            self.material = Some(material.clone());
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(price) = update.price {
            self.pricing.selling_price = price;
        }
        if let Some(p) = &update.pricing {
            if let Some(mrp) = p.mrp {
                self.pricing.mrp = Some(mrp);
            }
            if let Some(selling_price) = p.selling_price {
                self.pricing.selling_price = selling_price;
            }
            if let Some(currency) = &p.currency {
                self.pricing.currency = currency.clone();
            }
            if let Some(tax_percent) = p.tax_percent {
                self.pricing.tax_percent = tax_percent;
            }
        }
        if let Some(variants) = &update.variants {
            self.variants = variants.clone();
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(rating) = &update.rating {
            self.rating = rating.clone();
        }
        if let Some(shipping) = &update.shipping {
            self.shipping = shipping.clone();
        }
        if let Some(policies) = &update.policies {
            self.policies = policies.clone();
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Query filters for listing products.
///
/// Unrecognized parameters are dropped by deserialization; malformed
/// numeric bounds are treated as absent rather than failing the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Exact brand match
    pub brand: Option<String>,
    /// Exact gender match (men / women / unisex / kids)
    pub gender: Option<String>,
    /// Only the literal "true" selects active products; any other value
    /// selects inactive ones; absent shows both
    pub is_active: Option<String>,
    /// Variant size to match
    pub size: Option<String>,
    /// Variant color to match
    pub color: Option<String>,
    /// Inclusive lower bound on the selling price
    #[serde(default, deserialize_with = "lenient_price")]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<f64>,
    /// Inclusive upper bound on the selling price
    #[serde(default, deserialize_with = "lenient_price")]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Coerce the raw `isActive` parameter: present and exactly "true"
    /// means active, any other present value means inactive, absent means
    /// no filter.
    pub fn active_filter(&self) -> Option<bool> {
        self.is_active.as_deref().map(|v| v == "true")
    }
}

/// Query-string numbers arrive as text; anything unparsable becomes an
/// absent bound instead of a rejected request.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

/// One page of catalog results
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub pages: u64,
}
