//! Environment-backed server configuration.

use std::str::FromStr;
use taleweaver_error::{ConfigError, TaleweaverResult};
use taleweaver_vendors::ImageVendor;

/// Configuration for the server and its collaborators.
///
/// Narration settings are optional at startup: the pipeline fails fast at
/// narration time if a user requests audio while they are unset.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct ServerConfig {
    /// Postgres connection string
    database_url: String,
    /// Base URL of the object storage service
    storage_url: String,
    /// Shared bucket for story assets
    storage_bucket: String,
    /// Service credential for blob uploads
    storage_service_key: String,
    /// Base URL of the session service
    auth_url: String,
    /// Public API key sent alongside session lookups
    auth_api_key: String,
    /// Key for the Generative Language API (text and images)
    gemini_api_key: String,
    /// Which image backend to use
    image_vendor: ImageVendor,
    /// ElevenLabs credential, required only for narration
    elevenlabs_api_key: Option<String>,
    /// Fixed narration voice, required only for narration
    default_voice_id: Option<String>,
}

fn required(name: &'static str) -> TaleweaverResult<String> {
    std::env::var(name).map_err(|_| ConfigError::new(format!("{name} not set")).into())
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`, `STORAGE_URL`, `STORAGE_SERVICE_KEY`,
    /// `AUTH_URL`, `AUTH_API_KEY`, `GEMINI_API_KEY`.
    /// Optional: `STORAGE_BUCKET` (default "story-images"), `IMAGE_VENDOR`
    /// ("gemini" or "imagen", default "gemini"), `ELEVENLABS_API_KEY`,
    /// `DEFAULT_VOICE_ID`.
    pub fn from_env() -> TaleweaverResult<Self> {
        let image_vendor = match std::env::var("IMAGE_VENDOR") {
            Ok(tag) => ImageVendor::from_str(&tag).map_err(|_| {
                ConfigError::new(format!("IMAGE_VENDOR has unknown value {tag:?}"))
            })?,
            Err(_) => ImageVendor::Gemini,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            storage_url: required("STORAGE_URL")?,
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "story-images".to_string()),
            storage_service_key: required("STORAGE_SERVICE_KEY")?,
            auth_url: required("AUTH_URL")?,
            auth_api_key: required("AUTH_API_KEY")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            image_vendor,
            elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
            default_voice_id: std::env::var("DEFAULT_VOICE_ID").ok(),
        })
    }
}
