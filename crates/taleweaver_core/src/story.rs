//! The story row and its derivation helpers.

use crate::Language;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque story identifier, assigned by the record store at insert time.
pub type StoryId = Uuid;

/// A persisted story row.
///
/// The row is created whole by the orchestrator and mutated only by
/// whole-field updates (`image_url`, `audio_url`) during enrichment.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{Story, Language};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let story = Story {
///     id: Uuid::new_v4(),
///     title: "Mia's Ocean Adventure".to_string(),
///     text: "Once upon a time, Mia went on an amazing Ocean adventure.".to_string(),
///     lang: Language::English,
///     image_url: Some("https://example.com/placeholder.png".to_string()),
///     audio_url: None,
///     user_id: "user-1".to_string(),
///     created_at: Utc::now(),
/// };
/// assert!(story.audio_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier assigned by the store
    pub id: StoryId,
    /// Derived title, immutable after creation
    pub title: String,
    /// Prose body, never empty after creation
    pub text: String,
    /// Language selected by the requester
    pub lang: Language,
    /// Placeholder at creation, replaced by image enrichment
    pub image_url: Option<String>,
    /// Absent until the user requests narration
    pub audio_url: Option<String>,
    /// Identifier of the authenticated requester
    pub user_id: String,
    /// Assignment timestamp, set by the store
    pub created_at: DateTime<Utc>,
}

/// Field set for inserting a new story row.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStory {
    /// Derived title
    pub title: String,
    /// Prose body (generated or templated)
    pub text: String,
    /// Language selected by the requester
    pub lang: Language,
    /// Placeholder image URL; never null at insert
    pub image_url: String,
    /// Owner of the story
    pub user_id: String,
}

/// Derive a story title from the child's name and theme.
///
/// # Examples
///
/// ```
/// use taleweaver_core::story_title;
///
/// assert_eq!(story_title("Mia", "Ocean"), "Mia's Ocean Adventure");
/// ```
pub fn story_title(child_name: &str, theme: &str) -> String {
    format!("{child_name}'s {theme} Adventure")
}

/// Prefix shared by every creation-time placeholder image URL.
pub(crate) const PLACEHOLDER_PREFIX: &str = "https://source.unsplash.com/random/800x600/?";

/// Provisional image URL assigned at creation, keyed by theme.
///
/// The URL is replaced by the image-enrichment step; until then the client
/// renders this placeholder.
///
/// # Examples
///
/// ```
/// use taleweaver_core::placeholder_image_url;
///
/// let url = placeholder_image_url("Deep Sea");
/// assert!(url.starts_with("https://source.unsplash.com/random/800x600/?"));
/// assert!(url.contains("Deep%20Sea"));
/// ```
pub fn placeholder_image_url(theme: &str) -> String {
    let encoded = utf8_percent_encode(theme, NON_ALPHANUMERIC);
    format!("{PLACEHOLDER_PREFIX}{encoded}")
}
