//! Configuration-driven image backend selection.

use crate::{GeminiImageClient, ImagenClient};
use std::sync::Arc;
use taleweaver_interface::ImageGenerator;

/// Which image-generation backend to use.
///
/// Selection is by configuration, never by runtime type inspection; the
/// orchestrator only ever sees the `ImageGenerator` trait.
///
/// # Examples
///
/// ```
/// use taleweaver_vendors::ImageVendor;
/// use std::str::FromStr;
///
/// assert_eq!(ImageVendor::from_str("imagen").unwrap(), ImageVendor::Imagen);
/// assert!(ImageVendor::from_str("dalle").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ImageVendor {
    /// Gemini flash image endpoint
    Gemini,
    /// Imagen endpoint
    Imagen,
}

impl ImageVendor {
    /// Construct the configured backend.
    pub fn client(self, api_key: impl Into<String>) -> Arc<dyn ImageGenerator> {
        match self {
            ImageVendor::Gemini => Arc::new(GeminiImageClient::new(api_key)),
            ImageVendor::Imagen => Arc::new(ImagenClient::new(api_key)),
        }
    }
}
