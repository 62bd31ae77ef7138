//! HTTP surface for the Taleweaver story pipeline.
//!
//! Three endpoints mirror the pipeline operations: story creation, image
//! enrichment, and narration. Every route answers a permissive CORS
//! preflight and requires a bearer credential on actual requests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod routes;

pub use auth::HttpSessionVerifier;
pub use config::ServerConfig;
pub use routes::{create_router, AppState};
