//! Server configuration
//!
//! Read once at startup from Shuttle secrets. A single flag
//! (`AI_MOCK_ENABLED`) selects both the offline generator and the
//! pass-through image store.

use std::time::Duration;

use thiserror::Error;

const DEFAULT_REGION: &str = "ap-northeast-2";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ANALYSIS_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0} (required when AI_MOCK_ENABLED=false)")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// OpenAI settings for the live generator
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// API root, overridable for proxies and compatible gateways
    pub base_url: String,
    pub analysis_model: String,
    pub image_model: String,
}

/// S3 bucket settings for the archiving image store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket_name: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Offline generator + pass-through image store when true
    pub mock_mode: bool,
    /// Present only in live mode
    pub openai: Option<OpenAiConfig>,
    /// Present only in live mode
    pub storage: Option<StorageConfig>,
    /// Applied to each generator call, image download and upload
    pub external_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Build from any key lookup (secrets, env, test maps)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mock_mode = match get("AI_MOCK_ENABLED") {
            Some(value) => parse_bool("AI_MOCK_ENABLED", &value)?,
            None => true,
        };

        let external_timeout = match get("EXTERNAL_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("EXTERNAL_TIMEOUT_SECS", &value)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(value) => parse_number("MAX_UPLOAD_BYTES", &value)?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        if mock_mode {
            return Ok(Self {
                mock_mode,
                openai: None,
                storage: None,
                external_timeout,
                max_upload_bytes,
            });
        }

        let openai = OpenAiConfig {
            api_key: get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?,
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            analysis_model: get("OPENAI_ANALYSIS_MODEL")
                .unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string()),
            image_model: get("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        };

        let storage = StorageConfig {
            bucket_name: get("AWS_S3_BUCKET_NAME")
                .ok_or(ConfigError::Missing("AWS_S3_BUCKET_NAME"))?,
            region: get("AWS_S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
        };

        Ok(Self {
            mock_mode,
            openai: Some(openai),
            storage: Some(storage),
            external_timeout,
            max_upload_bytes,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
