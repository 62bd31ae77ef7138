//! Core data types for the Taleweaver story pipeline.
//!
//! This crate provides the foundation data types used across all Taleweaver
//! interfaces: the story row, creation requests, language tags, the derived
//! enrichment stage, and the prompt/template builders the orchestrator uses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod enrichment;
mod language;
mod media;
mod prompt;
mod request;
mod story;

pub use enrichment::EnrichmentStage;
pub use language::Language;
pub use media::GeneratedMedia;
pub use prompt::{
    fallback_story_text, image_prompt, story_system_instruction, story_user_prompt,
};
pub use request::CreateStoryRequest;
pub use story::{placeholder_image_url, story_title, NewStory, Story, StoryId};
