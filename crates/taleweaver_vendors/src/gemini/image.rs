//! Image-generation adapters for the Generative Language API.
//!
//! Two interchangeable backends exist behind the same `ImageGenerator`
//! contract: the flash image endpoint and the Imagen endpoint. Both return
//! base64-encoded PNG bytes in the same `generatedImages` envelope.

use super::wire::GeneratedImagesResponse;
use super::GEMINI_API_BASE;
use crate::http::ensure_success;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::json;
use taleweaver_core::GeneratedMedia;
use taleweaver_error::{TaleweaverResult, VendorError, VendorErrorKind};
use taleweaver_interface::ImageGenerator;
use tracing::{debug, error, instrument};

const FLASH_IMAGE_MODEL: &str = "gemini-2.0-flash";
const IMAGEN_MODEL: &str = "imagen-3.0-generate-001";

/// Decode the first generated image out of a vendor response body.
fn decode_first_image(
    vendor: &'static str,
    envelope: GeneratedImagesResponse,
) -> TaleweaverResult<GeneratedMedia> {
    let image = envelope.generated_images.into_iter().next().ok_or_else(|| {
        VendorError::new(
            vendor,
            VendorErrorKind::Empty("no image data in response".to_string()),
        )
    })?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&image.image_bytes)
        .map_err(|e| {
            error!(error = ?e, "Image bytes were not valid base64");
            VendorError::new(vendor, VendorErrorKind::UnexpectedResponse(e.to_string()))
        })?;

    Ok(GeneratedMedia::new(bytes, "image/png"))
}

/// Send an image-generation request and parse the shared envelope.
async fn post_image_request(
    client: &Client,
    vendor: &'static str,
    url: &str,
    body: &serde_json::Value,
) -> TaleweaverResult<GeneratedMedia> {
    let response = client.post(url).json(body).send().await.map_err(|e| {
        error!(error = ?e, vendor, "Failed to send image request");
        VendorError::new(vendor, VendorErrorKind::Http(e.to_string()))
    })?;

    let response = ensure_success(vendor, response).await?;

    let envelope: GeneratedImagesResponse = response.json().await.map_err(|e| {
        error!(error = ?e, vendor, "Failed to parse image response");
        VendorError::new(vendor, VendorErrorKind::UnexpectedResponse(e.to_string()))
    })?;

    decode_first_image(vendor, envelope)
}

/// Flash-model image generation client.
#[derive(Debug, Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
}

impl GeminiImageClient {
    /// Creates a new flash image client.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new Gemini image client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> TaleweaverResult<GeneratedMedia> {
        debug!("Generating image with Gemini flash model");

        let url = format!(
            "{GEMINI_API_BASE}/{FLASH_IMAGE_MODEL}:generateContent?key={}",
            self.api_key
        );
        let body = json!({
            "prompt": prompt,
            "config": {
                "numberOfImages": 1,
                "aspectRatio": "1:1",
                "safetyFilterLevel": "BLOCK_ONLY_HIGH",
                "personGeneration": "ALLOW_ADULT",
            },
        });

        post_image_request(&self.client, "gemini", &url, &body).await
    }

    fn vendor_name(&self) -> &'static str {
        "gemini"
    }
}

/// Imagen image generation client.
#[derive(Debug, Clone)]
pub struct ImagenClient {
    client: Client,
    api_key: String,
}

impl ImagenClient {
    /// Creates a new Imagen client.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new Imagen client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageGenerator for ImagenClient {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> TaleweaverResult<GeneratedMedia> {
        debug!("Generating image with Imagen");

        let url = format!(
            "{GEMINI_API_BASE}/{IMAGEN_MODEL}:generateImage?key={}",
            self.api_key
        );
        let body = json!({
            "prompt": prompt,
            "safetySettings": [
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
            ],
            "generationConfig": {
                "aspectRatio": "3:4",
                "negativePrompt": "violence, scary, dark, inappropriate content",
            },
        });

        post_image_request(&self.client, "imagen", &url, &body).await
    }

    fn vendor_name(&self) -> &'static str {
        "imagen"
    }
}
