//! Gemini text generation adapter.

use super::wire::{Content, GenerateContentRequest, GenerateContentResponse};
use super::GEMINI_API_BASE;
use crate::http::ensure_success;
use async_trait::async_trait;
use reqwest::Client;
use taleweaver_error::{TaleweaverResult, VendorError, VendorErrorKind};
use taleweaver_interface::TextGenerator;
use tracing::{debug, error, instrument};

const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Gemini completion client.
#[derive(Debug, Clone)]
pub struct GeminiTextClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTextClient {
    /// Creates a new client for the default text model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_TEXT_MODEL)
    }

    /// Creates a new client for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Gemini text client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiTextClient {
    #[instrument(skip(self, system_instruction, prompt), fields(model = %self.model))]
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> TaleweaverResult<String> {
        debug!("Sending generateContent request to Gemini");

        let body = GenerateContentRequest {
            system_instruction: Content::system(system_instruction),
            contents: vec![Content::user(prompt)],
        };

        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            error!(error = ?e, "Failed to send request to Gemini");
            VendorError::new("gemini", VendorErrorKind::Http(e.to_string()))
        })?;

        let response = ensure_success("gemini", response).await?;

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            VendorError::new("gemini", VendorErrorKind::UnexpectedResponse(e.to_string()))
        })?;

        envelope.first_text().ok_or_else(|| {
            VendorError::new(
                "gemini",
                VendorErrorKind::Empty("no candidate text in response".to_string()),
            )
            .into()
        })
    }

    fn vendor_name(&self) -> &'static str {
        "gemini"
    }
}
