//! PostgreSQL implementation of MonsterRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use momon::{DomainError, MonsterRecord, MonsterRepository, NewMonster};

use super::map_db_error;

/// PostgreSQL implementation of MonsterRepository
pub struct PgMonsterRepository {
    pool: PgPool,
}

impl PgMonsterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MonsterRow {
    id: i64,
    device_id: String,
    name: String,
    description: String,
    image_url: String,
    source_prompt: String,
    created_at: DateTime<Utc>,
}

impl From<MonsterRow> for MonsterRecord {
    fn from(row: MonsterRow) -> Self {
        Self {
            id: row.id,
            owner_device_id: row.device_id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            source_prompt: row.source_prompt,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MonsterRepository for PgMonsterRepository {
    async fn insert(&self, monster: &NewMonster) -> Result<MonsterRecord, DomainError> {
        let row = sqlx::query_as::<_, MonsterRow>(
            r#"
            INSERT INTO monsters (device_id, name, description, image_url, source_prompt, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&monster.owner_device_id)
        .bind(&monster.name)
        .bind(&monster.description)
        .bind(&monster.image_url)
        .bind(&monster.source_prompt)
        .bind(monster.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MonsterRecord>, DomainError> {
        let row = sqlx::query_as::<_, MonsterRow>("SELECT * FROM monsters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_owner(&self, device_id: &str) -> Result<Vec<MonsterRecord>, DomainError> {
        let rows = sqlx::query_as::<_, MonsterRow>(
            "SELECT * FROM monsters WHERE device_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(device_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
