//! Identity Repository Port
//!
//! Abstract interface for Identity persistence operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{errors::DomainError, Identity};

/// Repository interface for Identity entities
///
/// Implementations must enforce uniqueness of `device_id` at the storage
/// level and report a duplicate insert as [`DomainError::Conflict`].
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an Identity by device id
    async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Identity>, DomainError>;

    /// Insert a brand-new Identity
    async fn insert(&self, identity: &Identity) -> Result<Identity, DomainError>;

    /// Advance `last_seen_at` to `seen_at` (never backwards)
    async fn touch(&self, device_id: &str, seen_at: DateTime<Utc>)
        -> Result<Identity, DomainError>;
}
