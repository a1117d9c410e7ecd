//! Image-field normalization.
//!
//! Client payloads mix bare URL strings, `{url, alt}` objects, and nulls in
//! the same array. Everything is normalized into [`ProductImage`] before
//! storage; entries without a usable url are dropped, never stored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ProductImage;

/// One incoming image entry in any of its accepted shapes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ImageInput {
    /// Bare URL string
    Url(String),
    /// Full descriptor, possibly with missing pieces
    Descriptor {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
    },
    /// Null entry, dropped by normalization
    Empty,
}

/// Normalize a mixed image sequence.
///
/// - bare strings become `{url, alt: fallback_alt}`
/// - descriptors keep their url; alt defaults to the own alt, else
///   `fallback_alt`, else ""
/// - null entries and entries with an empty url are dropped
///
/// Normalizing an already-normalized sequence with the same fallback yields
/// the same sequence.
pub fn normalize_images(images: &[ImageInput], fallback_alt: &str) -> Vec<ProductImage> {
    images
        .iter()
        .filter_map(|img| match img {
            ImageInput::Url(url) => Some(ProductImage {
                url: url.clone(),
                alt: fallback_alt.to_string(),
            }),
            ImageInput::Descriptor { url, alt } => url.as_ref().map(|url| ProductImage {
                url: url.clone(),
                alt: alt
                    .clone()
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| fallback_alt.to_string()),
            }),
            ImageInput::Empty => None,
        })
        .filter(|img| !img.url.is_empty())
        .collect()
}
