//! Monster Repository Port
//!
//! Abstract interface for Monster persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, MonsterRecord, NewMonster};

/// Repository interface for Monster records
#[async_trait]
pub trait MonsterRepository: Send + Sync {
    /// Persist a new monster, assigning its id
    async fn insert(&self, monster: &NewMonster) -> Result<MonsterRecord, DomainError>;

    /// Find a monster by id
    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRecord>, DomainError>;

    /// All monsters owned by a device, newest first
    async fn find_by_owner(&self, device_id: &str) -> Result<Vec<MonsterRecord>, DomainError>;
}
