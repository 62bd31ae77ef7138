//! The client observer contract.
//!
//! The feed carries forward deltas only, so every observer subscribes
//! first and then fetches current state; events received during the fetch
//! are applied afterwards and wholesale-replace the local copy.

use taleweaver_core::{Story, StoryId};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::{
    ChangeFeed, EventFilter, StoryEvent, StoryRepository, Subscription,
};
use tracing::{debug, instrument};

/// Local view of one story row.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedStory {
    /// Initial fetch has not completed yet
    Loading,
    /// The current row
    Present(Story),
    /// The row does not exist (never did, or was deleted)
    NotFound,
}

/// Observer for a single story row.
///
/// Holds a live feed registration for the story's id and a local copy of
/// the row. The registration is released by [`detach`] or, failing that,
/// when the observer is dropped.
///
/// [`detach`]: StoryObserver::detach
pub struct StoryObserver {
    id: StoryId,
    state: ObservedStory,
    subscription: Box<dyn Subscription>,
}

impl StoryObserver {
    /// Subscribe to a story's events and fetch its current state.
    ///
    /// A missing row is a valid initial state (`NotFound`), not an error;
    /// only transport-level fetch failures propagate.
    #[instrument(skip(stories, feed))]
    pub async fn attach(
        stories: &dyn StoryRepository,
        feed: &dyn ChangeFeed,
        id: StoryId,
    ) -> TaleweaverResult<Self> {
        // Subscribe before fetching so no delta between the two is missed.
        let subscription = feed.subscribe(EventFilter::Story(id));

        let state = match stories.get(id).await {
            Ok(story) => ObservedStory::Present(story),
            Err(e) if e.is_not_found() => ObservedStory::NotFound,
            Err(e) => return Err(e),
        };

        debug!(story_id = %id, "Attached story observer");
        Ok(Self {
            id,
            state,
            subscription,
        })
    }

    /// The story id this observer watches.
    pub fn id(&self) -> StoryId {
        self.id
    }

    /// The current local view.
    pub fn state(&self) -> &ObservedStory {
        &self.state
    }

    /// Wait for the next event and apply it.
    ///
    /// Returns the updated view, or `None` once the feed has closed.
    pub async fn next(&mut self) -> Option<&ObservedStory> {
        let event = self.subscription.next_event().await?;
        self.apply(event);
        Some(&self.state)
    }

    /// Apply one event to the local view.
    ///
    /// Updates replace the copy wholesale; a deletion transitions to
    /// `NotFound` rather than erroring.
    pub fn apply(&mut self, event: StoryEvent) {
        match event {
            StoryEvent::Updated(story) if story.id == self.id => {
                self.state = ObservedStory::Present(story);
            }
            StoryEvent::Deleted(id) if id == self.id => {
                self.state = ObservedStory::NotFound;
            }
            _ => {}
        }
    }

    /// Explicitly release the feed registration.
    pub fn detach(self) {
        debug!(story_id = %self.id, "Detaching story observer");
        self.subscription.unsubscribe();
    }
}

/// Observer for every story owned by one user.
///
/// Maintains the owner's library newest-first, mirroring the listing order
/// of the record store.
pub struct LibraryObserver {
    user_id: String,
    stories: Vec<Story>,
    subscription: Box<dyn Subscription>,
}

impl LibraryObserver {
    /// Subscribe to the owner's events and fetch the current library.
    #[instrument(skip(stories, feed))]
    pub async fn attach(
        stories: &dyn StoryRepository,
        feed: &dyn ChangeFeed,
        user_id: &str,
    ) -> TaleweaverResult<Self> {
        let subscription = feed.subscribe(EventFilter::Owner(user_id.to_string()));
        let current = stories.list_for_owner(user_id).await?;

        debug!(owner = %user_id, count = current.len(), "Attached library observer");
        Ok(Self {
            user_id: user_id.to_string(),
            stories: current,
            subscription,
        })
    }

    /// The current library, newest first.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Wait for the next event and apply it.
    pub async fn next(&mut self) -> Option<&[Story]> {
        let event = self.subscription.next_event().await?;
        self.apply(event);
        Some(&self.stories)
    }

    /// Apply one event to the library view.
    ///
    /// The owner filter admits every deletion (delete events carry only an
    /// id), so deletions of rows this library never held are ignored here.
    pub fn apply(&mut self, event: StoryEvent) {
        match event {
            StoryEvent::Updated(story) => {
                if story.user_id != self.user_id {
                    return;
                }
                match self.stories.iter_mut().find(|s| s.id == story.id) {
                    Some(existing) => *existing = story,
                    None => {
                        self.stories.insert(0, story);
                        self.stories
                            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    }
                }
            }
            StoryEvent::Deleted(id) => {
                self.stories.retain(|s| s.id != id);
            }
        }
    }

    /// Explicitly release the feed registration.
    pub fn detach(self) {
        debug!(owner = %self.user_id, "Detaching library observer");
        self.subscription.unsubscribe();
    }
}
