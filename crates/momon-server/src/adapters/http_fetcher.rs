//! HTTP Image Fetcher
//!
//! Downloads generated images using reqwest with a bounded timeout.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use momon::{DomainError, ImageFetcher};

/// reqwest implementation of ImageFetcher
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("momon-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::upload("Failed to build HTTP client", e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let reason = if e.is_timeout() { "timed out" } else { "request failed" };
            DomainError::upload(format!("Failed to download image: {reason}"), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::upload(
                format!("Failed to download image: HTTP {}", status.as_u16()),
                format!("GET {url} returned {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::upload("Failed to read image body", e))?;

        tracing::info!("📥 Downloaded image from URL: {} ({} bytes)", url, bytes.len());

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{http::StatusCode, routing::get, Router};

    fn image_server() -> Router {
        Router::new()
            .route("/image.png", get(|| async { vec![0x89_u8, b'P', b'N', b'G'] }))
            .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/slow.png",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    vec![0_u8]
                }),
            )
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = spawn_server(image_server()).await;
        let fetcher = HttpImageFetcher::new(Duration::from_secs(5)).unwrap();

        let bytes = fetcher.fetch(&format!("{base}/image.png")).await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_upload_failure() {
        let base = spawn_server(image_server()).await;
        let fetcher = HttpImageFetcher::new(Duration::from_secs(5)).unwrap();

        let err = fetcher
            .fetch(&format!("{base}/missing.png"))
            .await
            .unwrap_err();
        match err {
            DomainError::Upload { message, .. } => assert!(message.contains("404")),
            other => panic!("expected upload failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_upload_failure() {
        let base = spawn_server(image_server()).await;
        let fetcher = HttpImageFetcher::new(Duration::from_millis(200)).unwrap();

        let err = fetcher.fetch(&format!("{base}/slow.png")).await.unwrap_err();
        match err {
            DomainError::Upload { message, .. } => assert!(message.contains("timed out")),
            other => panic!("expected upload failure, got {other:?}"),
        }
    }
}
