//! Identity Application Service
//!
//! Resolves a device id to its Identity, creating it on first contact.

use std::sync::Arc;

use momon::{Clock, DomainError, Identity, IdentityRepository};

/// Application service for Identity resolution
pub struct IdentityService<R: IdentityRepository> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: IdentityRepository> IdentityService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Upsert: advance `last_seen_at` for a known device, create it otherwise.
    ///
    /// A duplicate-key failure on insert means a concurrent request created
    /// the row first; that case is retried as an update.
    pub async fn resolve(&self, device_id: &str) -> Result<Identity, DomainError> {
        if device_id.trim().is_empty() {
            return Err(DomainError::Validation("Device id must not be empty".to_string()));
        }

        let now = self.clock.now();

        if self.repo.find_by_device_id(device_id).await?.is_some() {
            return self.repo.touch(device_id, now).await;
        }

        match self.repo.insert(&Identity::first_contact(device_id, now)).await {
            Ok(identity) => {
                tracing::info!("👤 Creating new user: {}", device_id);
                Ok(identity)
            }
            Err(e) if e.is_conflict() => {
                tracing::info!("👥 Concurrent first contact for {}, updating instead", device_id);
                self.repo.touch(device_id, now).await
            }
            Err(e) => Err(e),
        }
    }
}
