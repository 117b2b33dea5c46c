//! OpenAI Persona Generator
//!
//! Live generative backend: a vision chat completion turns the uploaded
//! image and emotion text into a persona, and the images API draws it.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use momon::{DomainError, ImageUpload, PersonaDescriptor, PersonaGenerator};

use crate::config::OpenAiConfig;

const IMAGE_SIZE: &str = "1024x1024";

const ANALYSIS_INSTRUCTIONS: &str = "You design cute collectible monsters. \
Look at the photo and the user's feeling, then invent one monster inspired by both. \
Reply with a JSON object with exactly these keys: \
\"name\" (a short Korean name, at most 20 characters), \
\"description\" (two friendly Korean sentences about its look and personality), \
\"imagePrompt\" (an English prompt for an image model: cute monster illustration, \
kawaii style, soft pastel colors, plain background).";

/// OpenAI implementation of PersonaGenerator
#[derive(Clone)]
pub struct OpenAiPersonaGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    analysis_model: String,
    image_model: String,
}

impl OpenAiPersonaGenerator {
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Generation(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            analysis_model: config.analysis_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, DomainError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Generation(format!("OpenAI request timed out: {e}"))
                } else {
                    DomainError::Generation(format!("OpenAI request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Generation(format!("Invalid OpenAI response: {e}")))
    }
}

#[async_trait]
impl PersonaGenerator for OpenAiPersonaGenerator {
    async fn analyze(
        &self,
        image: &ImageUpload,
        emotion_text: &str,
    ) -> Result<PersonaDescriptor, DomainError> {
        tracing::info!(
            "🤖 OpenAI: Analyzing image ({} bytes) with {}",
            image.len(),
            self.analysis_model
        );

        let data_url = format!(
            "data:{};base64,{}",
            image.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&image.bytes)
        );

        let request = json!({
            "model": self.analysis_model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": ANALYSIS_INSTRUCTIONS },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": format!("Today's feeling: {emotion_text}") },
                        { "type": "image_url", "image_url": { "url": data_url } }
                    ]
                }
            ]
        });

        let payload = self.post_json("/chat/completions", &request).await?;
        let persona = parse_persona(&payload)?;

        tracing::info!("   - Generated: {}", persona.name);
        Ok(persona)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, DomainError> {
        tracing::info!("🤖 OpenAI: Generating image with {}", self.image_model);

        let request = json!({
            "model": self.image_model,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
        });

        let payload = self.post_json("/images/generations", &request).await?;
        parse_image_url(&payload)
    }

    fn backend_name(&self) -> &str {
        "openai"
    }
}

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DomainError::Generation(format!("OpenAI rejected credentials ({status})"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            DomainError::Generation(format!("OpenAI quota or rate limit exceeded: {body}"))
        }
        _ => DomainError::Generation(format!("OpenAI API error ({status}): {body}")),
    }
}

/// Extract the persona JSON from a chat completion payload
fn parse_persona(payload: &Value) -> Result<PersonaDescriptor, DomainError> {
    let content = payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::Generation("OpenAI returned no message content".to_string()))?;

    let persona: PersonaDescriptor = serde_json::from_str(content)
        .map_err(|e| DomainError::Generation(format!("Malformed persona JSON: {e}")))?;

    persona.ensure_complete()
}

/// Extract the first image URL from an images API payload
fn parse_image_url(payload: &Value) -> Result<String, DomainError> {
    payload
        .pointer("/data/0/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::Generation("OpenAI returned no image URL".to_string()))
}
