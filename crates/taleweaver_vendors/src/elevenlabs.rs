//! ElevenLabs text-to-speech adapter.

use crate::http::ensure_success;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use taleweaver_core::GeneratedMedia;
use taleweaver_error::{TaleweaverResult, VendorError, VendorErrorKind};
use taleweaver_interface::Narrator;
use tracing::{debug, error, instrument};

const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const NARRATION_MODEL: &str = "eleven_multilingual_v2";

/// ElevenLabs narration client.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
}

impl ElevenLabsClient {
    /// Creates a new ElevenLabs client.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new ElevenLabs client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Narrator for ElevenLabsClient {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice_id))]
    async fn narrate(&self, text: &str, voice_id: &str) -> TaleweaverResult<GeneratedMedia> {
        debug!("Sending text-to-speech request to ElevenLabs");

        let body = json!({
            "text": text,
            "model_id": NARRATION_MODEL,
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
            },
        });

        let response = self
            .client
            .post(format!("{ELEVENLABS_API_URL}/{voice_id}"))
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to ElevenLabs");
                VendorError::new("elevenlabs", VendorErrorKind::Http(e.to_string()))
            })?;

        let response = ensure_success("elevenlabs", response).await?;

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = ?e, "Failed to read ElevenLabs audio body");
            VendorError::new("elevenlabs", VendorErrorKind::Http(e.to_string()))
        })?;

        if bytes.is_empty() {
            Err(VendorError::new(
                "elevenlabs",
                VendorErrorKind::Empty("vendor returned an empty audio body".to_string()),
            ))?;
        }

        debug!(size = bytes.len(), "Received narration audio");
        Ok(GeneratedMedia::new(bytes.to_vec(), "audio/mp3"))
    }

    fn vendor_name(&self) -> &'static str {
        "elevenlabs"
    }
}
