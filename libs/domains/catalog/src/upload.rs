//! Image upload collaborator.
//!
//! Inline image payloads (data URIs or remote URLs) are pushed to a hosted
//! CDN and only the resulting durable URL is stored. When the provider is
//! not configured the service reports that distinctly, so callers can retry
//! without the image instead of treating it as a storage failure.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::{CatalogError, CatalogResult};

/// Upload provider contract: raw payload in, durable hosted URL out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, payload: &str) -> CatalogResult<String>;
}

/// Cloudinary-backed uploader using signed uploads
pub struct CloudinaryUploader {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryUploader {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: folder.into(),
        }
    }

    /// Build from environment variables; `None` when credentials are absent.
    ///
    /// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`,
    ///   `CLOUDINARY_API_SECRET` (all required)
    /// - `CLOUDINARY_FOLDER` (optional, defaults to "ustore/products")
    pub fn from_env() -> Option<Self> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").ok()?;
        let api_key = std::env::var("CLOUDINARY_API_KEY").ok()?;
        let api_secret = std::env::var("CLOUDINARY_API_SECRET").ok()?;
        let folder = std::env::var("CLOUDINARY_FOLDER")
            .unwrap_or_else(|_| "ustore/products".to_string());

        Some(Self::new(cloud_name, api_key, api_secret, folder))
    }

    /// Sign the request: sha256 over the alphabetically-ordered parameter
    /// string with the API secret appended.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by_key(|&(k, _)| k);

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, payload: &str) -> CatalogResult<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", &self.folder), ("timestamp", &timestamp)]);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );
        let form = [
            ("file", payload),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("folder", &self.folder),
            ("signature", &signature),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| CatalogError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Upload(format!(
                "upload provider returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Upload(e.to_string()))?;

        Ok(body.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_all_credentials() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("key")),
                ("CLOUDINARY_API_SECRET", None::<&str>),
            ],
            || {
                assert!(CloudinaryUploader::from_env().is_none());
            },
        );

        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("key")),
                ("CLOUDINARY_API_SECRET", Some("secret")),
                ("CLOUDINARY_FOLDER", None::<&str>),
            ],
            || {
                let uploader = CloudinaryUploader::from_env().unwrap();
                assert_eq!(uploader.folder, "ustore/products");
            },
        );
    }

    #[test]
    fn signature_is_deterministic_and_order_independent() {
        let uploader = CloudinaryUploader::new("demo", "key", "secret", "ustore/products");

        let a = uploader.sign(&[("folder", "ustore/products"), ("timestamp", "1700000000")]);
        let b = uploader.sign(&[("timestamp", "1700000000"), ("folder", "ustore/products")]);

        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // sha256 hex
    }

    #[test]
    fn signature_depends_on_the_secret() {
        let one = CloudinaryUploader::new("demo", "key", "secret-a", "f");
        let two = CloudinaryUploader::new("demo", "key", "secret-b", "f");

        let params = [("folder", "f"), ("timestamp", "1700000000")];
        assert_ne!(one.sign(&params), two.sign(&params));
    }
}
