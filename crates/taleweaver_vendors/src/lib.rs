//! Generative AI vendor adapters for the Taleweaver pipeline.
//!
//! Each adapter is a stateless `reqwest` wrapper behind one of the
//! `taleweaver_interface` capability traits. Adapters apply no retries;
//! any non-success response or unexpected envelope surfaces as a
//! `VendorError` to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod elevenlabs;
mod gemini;
mod http;
mod selection;

pub use elevenlabs::ElevenLabsClient;
pub use gemini::{GeminiImageClient, GeminiTextClient, ImagenClient};
pub use selection::ImageVendor;
