//! PostgreSQL implementation of IdentityRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use momon::{DomainError, Identity, IdentityRepository};

use super::map_db_error;

/// PostgreSQL implementation of IdentityRepository
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct IdentityRow {
    device_id: String,
    first_seen_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl From<IdentityRow> for Identity {
    fn from(row: IdentityRow) -> Self {
        Self {
            device_id: row.device_id,
            first_seen_at: row.first_seen_at,
            last_seen_at: row.last_seen_at,
        }
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepository {
    async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Identity>, DomainError> {
        let row =
            sqlx::query_as::<_, IdentityRow>("SELECT * FROM identities WHERE device_id = $1")
                .bind(device_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, identity: &Identity) -> Result<Identity, DomainError> {
        // Primary key on device_id turns a lost race into a unique violation
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (device_id, first_seen_at, last_seen_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&identity.device_id)
        .bind(identity.first_seen_at)
        .bind(identity.last_seen_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn touch(
        &self,
        device_id: &str,
        seen_at: DateTime<Utc>,
    ) -> Result<Identity, DomainError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            UPDATE identities
            SET last_seen_at = GREATEST(last_seen_at, $2)
            WHERE device_id = $1
            RETURNING *
            "#,
        )
        .bind(device_id)
        .bind(seen_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Identity", device_id))
    }
}
