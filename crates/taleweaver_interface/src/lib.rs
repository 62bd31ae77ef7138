//! Trait definitions for the Taleweaver story pipeline.
//!
//! This crate provides the seams between the orchestrator and its external
//! collaborators: the generative AI vendors, the story record store, the
//! blob store, the change-notification feed, and the session service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
mod store;
mod vendors;

pub use events::StoryEvent;
pub use store::{BlobStore, ChangeFeed, EventFilter, SessionVerifier, StoryRepository, Subscription};
pub use vendors::{ImageGenerator, Narrator, TextGenerator};
