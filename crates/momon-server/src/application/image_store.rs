//! Image Store Implementations
//!
//! - `PassThroughImageStore`: mock mode, returns the reference unchanged
//! - `ArchivingImageStore`: downloads the image and keeps it in object storage

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use momon::{DomainError, ImageFetcher, ImageStore, ObjectStorage};

const KEY_PREFIX: &str = "monsters/";
const KEY_EXTENSION: &str = ".png";
const CONTENT_TYPE: &str = "image/png";

/// Mock-mode store: no network access, output equals input
#[derive(Debug, Clone, Default)]
pub struct PassThroughImageStore;

#[async_trait]
impl ImageStore for PassThroughImageStore {
    async fn persist_image(&self, image_ref: &str) -> Result<String, DomainError> {
        tracing::info!("🎭 Mock mode: Skipping S3 upload, returning original URL");
        tracing::info!("   - URL: {}", image_ref);
        Ok(image_ref.to_string())
    }
}

/// Real-mode store: one download, one upload
pub struct ArchivingImageStore {
    fetcher: Arc<dyn ImageFetcher>,
    storage: Arc<dyn ObjectStorage>,
}

impl ArchivingImageStore {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { fetcher, storage }
    }

    /// Globally unique object key
    fn storage_key() -> String {
        format!("{KEY_PREFIX}{}{KEY_EXTENSION}", Uuid::new_v4())
    }
}

#[async_trait]
impl ImageStore for ArchivingImageStore {
    async fn persist_image(&self, image_ref: &str) -> Result<String, DomainError> {
        let result = async {
            let bytes = self.fetcher.fetch(image_ref).await?;

            let key = Self::storage_key();
            self.storage.put_object(&key, bytes, CONTENT_TYPE).await?;

            Ok::<_, DomainError>(self.storage.public_url(&key))
        }
        .await;

        match result {
            Ok(url) => {
                tracing::info!("✅ Image uploaded to S3: {}", url);
                Ok(url)
            }
            Err(e) => {
                tracing::error!("❌ S3 upload failed for URL: {}: {}", image_ref, e);
                Err(into_upload_failure(e))
            }
        }
    }
}

/// Collapse any fetch/store error into a single upload failure
fn into_upload_failure(err: DomainError) -> DomainError {
    match err {
        upload @ DomainError::Upload { .. } => upload,
        other => DomainError::upload("Failed to upload image to S3", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryObjectStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        calls: AtomicUsize,
        result: fn() -> Result<Vec<u8>, DomainError>,
    }

    #[async_trait]
    impl ImageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    #[tokio::test]
    async fn test_pass_through_returns_input() {
        let store = PassThroughImageStore;
        let url = store
            .persist_image("https://placehold.co/1024x1024?text=a")
            .await
            .unwrap();
        assert_eq!(url, "https://placehold.co/1024x1024?text=a");
    }

    #[tokio::test]
    async fn test_archiving_stores_png_under_monsters_prefix() {
        let fetcher = Arc::new(StaticFetcher {
            calls: AtomicUsize::new(0),
            result: || Ok(vec![1, 2, 3]),
        });
        let storage = Arc::new(InMemoryObjectStorage::default());
        let store = ArchivingImageStore::new(fetcher.clone(), storage.clone());

        let url = store.persist_image("https://images.example/tmp.png").await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        let objects = storage.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        let (key, (bytes, content_type)) = objects.iter().next().unwrap();
        assert!(key.starts_with("monsters/"));
        assert!(key.ends_with(".png"));
        assert_eq!(bytes, &vec![1, 2, 3]);
        assert_eq!(content_type, "image/png");
        assert!(url.ends_with(key.as_str()));
    }

    #[test]
    fn test_archiving_keys_are_unique() {
        assert_ne!(
            ArchivingImageStore::storage_key(),
            ArchivingImageStore::storage_key()
        );
    }

    #[tokio::test]
    async fn test_foreign_errors_become_upload_failures() {
        let fetcher = Arc::new(StaticFetcher {
            calls: AtomicUsize::new(0),
            result: || Err(DomainError::Persistence("disk full".to_string())),
        });
        let storage = Arc::new(InMemoryObjectStorage::default());
        let store = ArchivingImageStore::new(fetcher, storage.clone());

        let err = store.persist_image("https://images.example/tmp.png").await.unwrap_err();

        assert!(matches!(err, DomainError::Upload { .. }));
        assert!(storage.objects.lock().unwrap().is_empty());
    }
}
