//! Wire types for the Generative Language API.

use serde::{Deserialize, Serialize};

/// One text part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    pub text: String,
}

/// A content block: role plus parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// generateContent request body for text generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

/// generateContent response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .parts_text()
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }
}

impl Candidate {
    fn parts_text(&self) -> impl Iterator<Item = &str> {
        self.content.parts.iter().map(|p| p.text.as_str())
    }
}

/// Image-generation response envelope shared by the flash and Imagen
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedImagesResponse {
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedImage {
    pub image_bytes: String,
}
