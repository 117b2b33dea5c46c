//! Monster DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use momon::MonsterRecord;

/// Monster response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonsterResponse {
    pub id: i64,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<MonsterRecord> for MonsterResponse {
    fn from(monster: MonsterRecord) -> Self {
        Self {
            id: monster.id,
            image_url: monster.image_url,
            name: monster.name,
            description: monster.description,
            created_at: monster.created_at,
        }
    }
}

/// Multipart form for monster creation (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateMonsterForm {
    /// Photo to turn into a monster
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// How the user feels today (1-100 characters)
    pub text: String,
}
