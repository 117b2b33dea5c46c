//! Offline Persona Generator
//!
//! Picks from a fixed catalog of pre-authored monsters. No network I/O and
//! no cost, for local development and tests.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use momon::{DomainError, ImageUpload, PersonaDescriptor, PersonaGenerator};

/// (name, description, image prompt)
pub const MOCK_CATALOG: [(&str, &str, &str); 5] = [
    (
        "스파클 슬라임",
        "반짝이는 젤리 같은 몸을 가진 귀여운 몬스터입니다. 빛을 받으면 무지개빛으로 반짝이며, 포근한 성격을 가지고 있어요.",
        "A cute jelly-like monster with sparkling iridescent body, kawaii style, pastel colors",
    ),
    (
        "플러피 구름이",
        "하얀 구름처럼 폭신폭신한 털을 가진 몬스터입니다. 항상 미소를 띠고 있으며, 만지면 솜사탕처럼 부드러워요.",
        "A fluffy cloud-like monster with soft white fur, always smiling, dreamy atmosphere",
    ),
    (
        "번개 토끼",
        "전기를 품은 빠른 토끼 몬스터입니다. 귀여운 외모와는 달리 번개처럼 빠르게 움직일 수 있어요.",
        "A lightning-fast rabbit monster with electric powers, cute but energetic, electric aura",
    ),
    (
        "캔디 드래곤",
        "사탕으로 만들어진 작은 드래곤 몬스터입니다. 달콤한 향기를 뿜으며, 알록달록한 비늘이 특징이에요.",
        "A small candy dragon monster with colorful scales, sweet and adorable, sugar-coated appearance",
    ),
    (
        "문라이트 폭스",
        "달빛을 받으면 빛나는 신비로운 여우 몬스터입니다. 밤하늘의 별처럼 반짝이는 털을 가지고 있어요.",
        "A mystical fox monster that glows under moonlight, starry fur pattern, magical atmosphere",
    ),
];

const PLACEHOLDER_BASE_URL: &str = "https://placehold.co/1024x1024/FFE5E5/FF6B9D";
const PLACEHOLDER_LABEL: &str = "몬스터 샘플";

/// Placeholder image reference returned by the offline image step
pub fn placeholder_image_url() -> String {
    format!(
        "{PLACEHOLDER_BASE_URL}?text={}",
        urlencoding::encode(PLACEHOLDER_LABEL)
    )
}

/// Offline implementation of PersonaGenerator
#[derive(Debug, Clone, Default)]
pub struct MockPersonaGenerator;

impl MockPersonaGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PersonaGenerator for MockPersonaGenerator {
    async fn analyze(
        &self,
        image: &ImageUpload,
        emotion_text: &str,
    ) -> Result<PersonaDescriptor, DomainError> {
        tracing::info!("🎭 Mock AI: Analyzing image and emotion text (no cost)");
        tracing::info!(
            "   - Image: {} ({} bytes)",
            image.file_name.as_deref().unwrap_or("<unnamed>"),
            image.len()
        );
        tracing::info!("   - Emotion: {}", emotion_text);

        let (name, description, image_prompt) = {
            let mut rng = rand::thread_rng();
            *MOCK_CATALOG
                .choose(&mut rng)
                .ok_or_else(|| DomainError::Generation("Mock catalog is empty".to_string()))?
        };

        tracing::info!("   - Generated: {}", name);
        Ok(PersonaDescriptor::new(name, description, image_prompt))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, DomainError> {
        tracing::info!("🎭 Mock AI: Returning sample image URL (no cost)");
        tracing::info!("   - Prompt: {}", prompt);

        Ok(placeholder_image_url())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_returns_catalog_entry() {
        let generator = MockPersonaGenerator::new();
        let image = ImageUpload::new(vec![1, 2, 3]);

        for _ in 0..20 {
            let persona = generator.analyze(&image, "happy").await.unwrap();
            assert!(MOCK_CATALOG
                .iter()
                .any(|(name, description, prompt)| persona.name == *name
                    && persona.description == *description
                    && persona.image_prompt == *prompt));
        }
    }

    #[tokio::test]
    async fn test_generate_image_is_encoded_placeholder() {
        let generator = MockPersonaGenerator::new();
        let url = generator.generate_image("anything").await.unwrap();

        assert!(url.starts_with("https://placehold.co/1024x1024/FFE5E5/FF6B9D?text="));
        assert!(url.ends_with(&*urlencoding::encode("몬스터 샘플")));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_catalog_entries_are_complete() {
        for (name, description, prompt) in MOCK_CATALOG {
            assert!(PersonaDescriptor::new(name, description, prompt)
                .ensure_complete()
                .is_ok());
        }
    }
}
