//! Trait definitions for the generative AI vendor adapters.
//!
//! Each adapter is a stateless request/response wrapper. None of them retry
//! internally; retries, if ever desired, belong to the caller.

use async_trait::async_trait;
use taleweaver_core::GeneratedMedia;
use taleweaver_error::TaleweaverResult;

/// Wraps a large-language-model completion call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate prose given a system instruction and a user prompt.
    ///
    /// Fails with a `VendorError` carrying the vendor's status code and
    /// message on any non-success response.
    async fn generate(&self, system_instruction: &str, prompt: &str)
        -> TaleweaverResult<String>;

    /// Vendor name (e.g. "gemini").
    fn vendor_name(&self) -> &'static str;
}

/// Wraps one of several interchangeable image-generation vendors.
///
/// The orchestrator is indifferent to which backend is configured; selection
/// happens by configuration, never by runtime type inspection.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate image bytes for a prompt.
    async fn generate(&self, prompt: &str) -> TaleweaverResult<GeneratedMedia>;

    /// Vendor name (e.g. "gemini", "imagen").
    fn vendor_name(&self) -> &'static str;
}

/// Wraps a text-to-speech vendor.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Generate narration audio for the given prose with a fixed voice.
    async fn narrate(&self, text: &str, voice_id: &str) -> TaleweaverResult<GeneratedMedia>;

    /// Vendor name (e.g. "elevenlabs").
    fn vendor_name(&self) -> &'static str;
}
