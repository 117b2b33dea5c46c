//! Monster Application Service (Use Case)
//!
//! Sequences monster creation: identity upsert, persona analysis, image
//! generation, durable image storage, then the monster record itself.
//! Every step is sequential and any failure aborts the remaining ones.
//! The identity write from the first step is kept even when a later step
//! fails, so `last_seen_at` may advance without a resulting monster.

use std::sync::Arc;

use momon::{
    Clock, DomainError, IdentityRepository, ImageStore, ImageUpload, MonsterRecord,
    MonsterRepository, NewMonster, PersonaGenerator,
};

use super::IdentityService;

/// Application service for Monster operations
pub struct MonsterService<I: IdentityRepository, M: MonsterRepository> {
    identities: IdentityService<I>,
    monsters: Arc<M>,
    generator: Arc<dyn PersonaGenerator>,
    image_store: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
}

impl<I: IdentityRepository, M: MonsterRepository> MonsterService<I, M> {
    pub fn new(
        identity_repo: Arc<I>,
        monster_repo: Arc<M>,
        generator: Arc<dyn PersonaGenerator>,
        image_store: Arc<dyn ImageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities: IdentityService::new(identity_repo, clock.clone()),
            monsters: monster_repo,
            generator,
            image_store,
            clock,
        }
    }

    /// Name of the generative backend in use ("mock" or "openai")
    pub fn backend_name(&self) -> &str {
        self.generator.backend_name()
    }

    /// Create a monster from an image and the caller's emotion text
    pub async fn create_monster(
        &self,
        device_id: &str,
        image: ImageUpload,
        emotion_text: &str,
    ) -> Result<MonsterRecord, DomainError> {
        tracing::info!("🎨 Creating monster for device: {}", device_id);
        tracing::info!(
            "   - Image: {} ({} bytes)",
            image.file_name.as_deref().unwrap_or("<unnamed>"),
            image.len()
        );
        tracing::info!("   - Emotion text: {}", emotion_text);

        // 1. Ensure user exists (upsert)
        let identity = self.identities.resolve(device_id).await?;

        // 2. Analyze image and emotion
        let persona = self
            .generator
            .analyze(&image, emotion_text)
            .await
            .inspect_err(|e| tracing::warn!("   - Analysis failed for {}: {}", device_id, e))?;
        tracing::info!(
            "   - Generated characteristics: {} (via {})",
            persona.name,
            self.generator.backend_name()
        );

        // 3. Generate monster image
        let generated_url = self
            .generator
            .generate_image(&persona.image_prompt)
            .await
            .inspect_err(|e| {
                tracing::warn!("   - Image generation failed for {}: {}", device_id, e)
            })?;
        tracing::info!("   - AI image URL: {}", generated_url);

        // 4. Move the image to permanent storage
        let image_url = self
            .image_store
            .persist_image(&generated_url)
            .await
            .inspect_err(|e| tracing::warn!("   - Image storage failed for {}: {}", device_id, e))?;
        tracing::info!("   - Permanent image URL: {}", image_url);

        // 5. Save, keeping the caller's own text as the source prompt
        let monster = NewMonster::from_persona(
            identity.device_id,
            persona,
            image_url,
            emotion_text,
            self.clock.now(),
        );
        let saved = self.monsters.insert(&monster).await?;

        tracing::info!("✅ Monster created successfully: {} (ID: {})", saved.name, saved.id);

        Ok(saved)
    }

    /// All monsters owned by a device, newest first. Never creates the identity.
    pub async fn list_monsters(&self, device_id: &str) -> Result<Vec<MonsterRecord>, DomainError> {
        tracing::info!("📋 Fetching monsters for device: {}", device_id);

        let monsters = self.monsters.find_by_owner(device_id).await?;

        tracing::info!("   - Found {} monsters", monsters.len());
        Ok(monsters)
    }

    /// Get a monster by id
    pub async fn get_monster(&self, id: i64) -> Result<MonsterRecord, DomainError> {
        tracing::info!("🔍 Fetching monster by ID: {}", id);

        let monster = self.monsters.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!("   - Monster not found: {}", id);
            DomainError::not_found("Monster", id)
        })?;

        tracing::info!("   - Found: {}", monster.name);
        Ok(monster)
    }
}
