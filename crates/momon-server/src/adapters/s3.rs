//! S3 Object Storage
//!
//! Durable image storage backed by an S3 bucket.

use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::{config::Credentials, error::DisplayErrorContext, primitives::ByteStream, Client};
use std::time::Duration;

use momon::{DomainError, ObjectStorage};

use crate::config::StorageConfig;

/// S3 implementation of ObjectStorage
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket_name: String,
    region: String,
}

impl S3ObjectStorage {
    /// Build a client from bucket settings; falls back to the default
    /// AWS credential chain when no static keys are configured
    pub async fn from_config(config: &StorageConfig, timeout: Duration) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                "momon-secrets",
            ));
        }

        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            bucket_name: config.bucket_name.clone(),
            region: config.region.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                DomainError::upload(
                    format!("Failed to upload {key} to S3 bucket {}", self.bucket_name),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket_name, &self.region, key)
    }
}

/// Virtual-hosted style URL of a public S3 object
pub fn public_object_url(bucket_name: &str, region: &str, key: &str) -> String {
    format!("https://{bucket_name}.s3.{region}.amazonaws.com/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("momon-images", "ap-northeast-2", "monsters/abc.png"),
            "https://momon-images.s3.ap-northeast-2.amazonaws.com/monsters/abc.png"
        );
    }
}
