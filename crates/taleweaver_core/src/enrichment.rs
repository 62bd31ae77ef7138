//! Derived enrichment stage of a story.

use crate::story::PLACEHOLDER_PREFIX;
use crate::Story;
use serde::{Deserialize, Serialize};

/// Enrichment stage derived from a story row, never stored explicitly.
///
/// `Created → ImageReady → Narrated`; `Narrated` is also reachable directly
/// from `Created`, since narration does not depend on image completion.
/// Deletion is terminal from any stage and is represented by the row's
/// absence, not by a stage value.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{EnrichmentStage, Language, Story, placeholder_image_url};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let story = Story {
///     id: Uuid::new_v4(),
///     title: "Mia's Ocean Adventure".to_string(),
///     text: "Once upon a time...".to_string(),
///     lang: Language::English,
///     image_url: Some(placeholder_image_url("Ocean")),
///     audio_url: None,
///     user_id: "user-1".to_string(),
///     created_at: Utc::now(),
/// };
/// assert_eq!(EnrichmentStage::of(&story), EnrichmentStage::Created);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum EnrichmentStage {
    /// Placeholder image, no audio
    Created,
    /// Real image, no audio
    ImageReady,
    /// Real audio (image may still be the placeholder)
    Narrated,
}

impl EnrichmentStage {
    /// Derive the stage from a story row.
    pub fn of(story: &Story) -> Self {
        if story.audio_url.is_some() {
            return EnrichmentStage::Narrated;
        }
        match &story.image_url {
            Some(url) if !is_placeholder(url) => EnrichmentStage::ImageReady,
            _ => EnrichmentStage::Created,
        }
    }
}

/// Whether an image URL is still the creation-time placeholder.
fn is_placeholder(url: &str) -> bool {
    url.starts_with(PLACEHOLDER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{placeholder_image_url, Language};
    use chrono::Utc;
    use uuid::Uuid;

    fn story() -> Story {
        Story {
            id: Uuid::new_v4(),
            title: "Mia's Ocean Adventure".to_string(),
            text: "Once upon a time...".to_string(),
            lang: Language::English,
            image_url: Some(placeholder_image_url("Ocean")),
            audio_url: None,
            user_id: "user-1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn placeholder_image_is_created() {
        assert_eq!(EnrichmentStage::of(&story()), EnrichmentStage::Created);
    }

    #[test]
    fn real_image_is_image_ready() {
        let mut s = story();
        s.image_url = Some("https://blobs.example.com/stories/abc.png".to_string());
        assert_eq!(EnrichmentStage::of(&s), EnrichmentStage::ImageReady);
    }

    #[test]
    fn audio_is_narrated_even_with_placeholder_image() {
        let mut s = story();
        s.audio_url = Some("https://blobs.example.com/stories/audio/abc.mp3".to_string());
        assert_eq!(EnrichmentStage::of(&s), EnrichmentStage::Narrated);
    }
}
