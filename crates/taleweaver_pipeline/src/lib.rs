//! Story generation orchestrator and the client observer contract.
//!
//! The orchestrator turns a creation request into a persisted story row,
//! returns it immediately, and triggers image enrichment as an independent
//! fire-and-forget unit of work. Narration enrichment runs only on explicit
//! user action and surfaces every failure. Observers consume the change
//! feed to keep a local copy of one story or of an owner's library current.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observer;
mod orchestrator;

pub use observer::{LibraryObserver, ObservedStory, StoryObserver};
pub use orchestrator::{audio_blob_path, image_blob_path, StoryOrchestrator};
