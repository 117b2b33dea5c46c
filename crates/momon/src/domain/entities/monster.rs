//! Monster - the durable artifact of the creation workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PersonaDescriptor;

/// Persisted monster, never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: i64,
    pub owner_device_id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Emotion text exactly as the caller supplied it
    pub source_prompt: String,
    pub created_at: DateTime<Utc>,
}

/// Monster awaiting its store-assigned id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMonster {
    pub owner_device_id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub source_prompt: String,
    pub created_at: DateTime<Utc>,
}

impl NewMonster {
    /// Combine the persona with the caller's original text and the permanent image url
    pub fn from_persona(
        owner_device_id: impl Into<String>,
        persona: PersonaDescriptor,
        image_url: impl Into<String>,
        source_prompt: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_device_id: owner_device_id.into(),
            name: persona.name,
            description: persona.description,
            image_url: image_url.into(),
            source_prompt: source_prompt.into(),
            created_at,
        }
    }

    pub fn into_record(self, id: i64) -> MonsterRecord {
        MonsterRecord {
            id,
            owner_device_id: self.owner_device_id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            source_prompt: self.source_prompt,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_prompt_is_caller_text_not_image_prompt() {
        let persona = PersonaDescriptor::new("캔디 드래곤", "달콤한 드래곤", "A candy dragon");
        let now = Utc::now();
        let monster = NewMonster::from_persona("d1", persona, "https://img/1.png", "happy", now);

        assert_eq!(monster.source_prompt, "happy");
        assert_eq!(monster.name, "캔디 드래곤");

        let record = monster.into_record(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.owner_device_id, "d1");
        assert_eq!(record.created_at, now);
    }
}
