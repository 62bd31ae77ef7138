//! Change-notification feed events.

use serde::{Deserialize, Serialize};
use taleweaver_core::{Story, StoryId};

/// A row-level event delivered by the change-notification feed.
///
/// Update events carry the whole row; observers replace their local copy
/// wholesale, never merging fields. A delete event means "story gone" and
/// must not be treated as an error by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryEvent {
    /// The row was inserted or updated; payload is the full current row
    Updated(Story),
    /// The row was removed
    Deleted(StoryId),
}

impl StoryEvent {
    /// The id of the story this event concerns.
    pub fn story_id(&self) -> StoryId {
        match self {
            StoryEvent::Updated(story) => story.id,
            StoryEvent::Deleted(id) => *id,
        }
    }

    /// The owner of the story, if the event carries one.
    ///
    /// Delete events carry only the id, so collection-scoped observers
    /// match deletions against ids they have already seen.
    pub fn owner(&self) -> Option<&str> {
        match self {
            StoryEvent::Updated(story) => Some(&story.user_id),
            StoryEvent::Deleted(_) => None,
        }
    }
}
