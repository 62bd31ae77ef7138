//! Google Gemini adapters: text generation and two interchangeable
//! image-generation backends.

mod image;
mod text;
mod wire;

pub use image::{GeminiImageClient, ImagenClient};
pub use text::GeminiTextClient;

/// Base URL for the Generative Language API.
pub(crate) const GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
