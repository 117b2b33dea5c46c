//! Image Storage Ports
//!
//! - `ImageStore`: turns a transient image reference into a permanent URL
//! - `ImageFetcher`: narrow `fetch(url) -> bytes` capability
//! - `ObjectStorage`: durable object writes

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Durable image store interface
///
/// Every failure surfaces as [`DomainError::Upload`] carrying its cause.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the referenced image and return its permanent public URL
    async fn persist_image(&self, image_ref: &str) -> Result<String, DomainError>;
}

/// Downloads raw bytes from a URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// GET the URL; any non-success status is an upload failure
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}

/// Durable object storage (S3 or compatible)
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write bytes under `key` with an explicit content type
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError>;

    /// Canonical public URL of an object stored under `key`
    fn public_url(&self, key: &str) -> String;
}
