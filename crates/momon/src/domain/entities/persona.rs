//! Persona Descriptor - output of image + emotion analysis

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Longest monster name the record store accepts
pub const MAX_PERSONA_NAME_CHARS: usize = 100;

/// AI-derived monster persona, consumed before persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDescriptor {
    pub name: String,
    pub description: String,
    /// Prompt fed to the image generation step
    pub image_prompt: String,
}

impl PersonaDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_prompt: image_prompt.into(),
        }
    }

    /// Reject descriptors with any blank field or a name that cannot be stored
    pub fn ensure_complete(self) -> Result<Self, DomainError> {
        let blank = [
            ("name", &self.name),
            ("description", &self.description),
            ("imagePrompt", &self.image_prompt),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = blank {
            return Err(DomainError::Generation(format!(
                "Persona descriptor has an empty {field}"
            )));
        }

        let name_length = self.name.chars().count();
        if name_length > MAX_PERSONA_NAME_CHARS {
            return Err(DomainError::Generation(format!(
                "Persona name too long: {name_length} characters"
            )));
        }

        Ok(self)
    }
}
