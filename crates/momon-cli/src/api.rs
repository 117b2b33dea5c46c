//! Momon API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::path::Path;

const DEVICE_ID_HEADER: &str = "X-Device-ID";

/// API Client for Momon
pub struct MomonClient {
    client: Client,
    base_url: String,
    device_id: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterResponse {
    pub id: i64,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub backend: Option<String>,
}

/// Guess an image content type from the file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

impl MomonClient {
    /// Create a new API client
    pub fn new(base_url: &str, device_id: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            device_id: device_id.to_string(),
        }
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Server health
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Momon API")?;

        Self::parse(resp).await
    }

    /// Upload an image with today's feeling and get a monster back
    pub async fn create_monster(&self, image_path: &Path, text: &str) -> Result<MonsterResponse> {
        let bytes = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read image {:?}", image_path))?;

        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        let image = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_path(image_path))?;

        let form = multipart::Form::new()
            .part("image", image)
            .text("text", text.to_string());

        let url = format!("{}/api/v1/monsters", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header(DEVICE_ID_HEADER, &self.device_id)
            .multipart(form)
            .send()
            .await
            .context("Failed to connect to Momon API")?;

        Self::parse(resp).await
    }

    /// List this device's monsters, newest first
    pub async fn list_monsters(&self) -> Result<Vec<MonsterResponse>> {
        let url = format!("{}/api/v1/monsters", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header(DEVICE_ID_HEADER, &self.device_id)
            .send()
            .await
            .context("Failed to connect to Momon API")?;

        Self::parse(resp).await
    }

    /// Get a single monster
    pub async fn get_monster(&self, id: i64) -> Result<MonsterResponse> {
        let url = format!("{}/api/v1/monsters/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Momon API")?;

        Self::parse(resp).await
    }
}
