//! Persona Generator Port
//!
//! Abstract interface for the generative backend. Two implementations
//! exist: an offline catalog (no network, no cost) and a live one that
//! calls an external model. One is selected at startup.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ImageUpload, PersonaDescriptor};

/// Generative backend interface
///
/// Neither operation retries; every failure surfaces as
/// [`DomainError::Generation`].
#[async_trait]
pub trait PersonaGenerator: Send + Sync {
    /// Derive a fully-populated persona from an image and emotion text
    async fn analyze(
        &self,
        image: &ImageUpload,
        emotion_text: &str,
    ) -> Result<PersonaDescriptor, DomainError>;

    /// Produce an image for the prompt, returning a (possibly expiring) reference
    async fn generate_image(&self, prompt: &str) -> Result<String, DomainError>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}
