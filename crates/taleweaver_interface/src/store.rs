//! Trait definitions for the record store, blob store, change feed, and
//! session service.

use crate::StoryEvent;
use async_trait::async_trait;
use taleweaver_core::{NewStory, Story, StoryId};
use taleweaver_error::TaleweaverResult;

/// Durable table of story rows.
///
/// All mutation is by whole-row or whole-field update scoped to one id; no
/// optimistic-concurrency token is used, so the last update wins on
/// conflicting concurrent writers.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert a new story row and return it with its assigned id and
    /// timestamp. No partial writes: the insert fully succeeds or nothing
    /// is persisted.
    async fn insert(&self, story: NewStory) -> TaleweaverResult<Story>;

    /// Fetch a story by id. Fails with a not-found persistence error if the
    /// row does not exist.
    async fn get(&self, id: StoryId) -> TaleweaverResult<Story>;

    /// All stories owned by a user, newest first.
    async fn list_for_owner(&self, user_id: &str) -> TaleweaverResult<Vec<Story>>;

    /// Replace the story's image URL and return the updated row.
    async fn update_image_url(&self, id: StoryId, image_url: &str) -> TaleweaverResult<Story>;

    /// Replace the story's audio URL and return the updated row.
    async fn update_audio_url(&self, id: StoryId, audio_url: &str) -> TaleweaverResult<Story>;

    /// Remove the row. Deletion is immediate and total; it propagates to
    /// observers via the change feed as a delete event.
    async fn delete(&self, id: StoryId) -> TaleweaverResult<()>;
}

/// Content upload by path with a stable public URL per path.
///
/// Re-uploading to the same path replaces the content behind the same URL
/// (URL stability, content instability).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes to a path, overwriting any prior content.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str)
        -> TaleweaverResult<()>;

    /// The stable public URL for a path. Derivable without a network call.
    fn public_url(&self, path: &str) -> String;
}

/// What a subscription listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Events for a single story row
    Story(StoryId),
    /// Events for every story owned by a user
    Owner(String),
}

impl EventFilter {
    /// Whether an event passes this filter.
    ///
    /// Delete events carry only the id, so an owner filter admits every
    /// deletion; collection observers match deletions against ids they
    /// already hold.
    pub fn matches(&self, event: &StoryEvent) -> bool {
        match self {
            EventFilter::Story(id) => event.story_id() == *id,
            EventFilter::Owner(user_id) => match event.owner() {
                Some(owner) => owner == user_id,
                None => true,
            },
        }
    }
}

/// A live feed registration.
///
/// Subscriptions deliver forward deltas only; subscribers must perform an
/// initial fetch after subscribing. The registration must be released
/// before the observer's own lifetime ends, either by calling
/// [`Subscription::unsubscribe`] or by dropping the handle.
#[async_trait]
pub trait Subscription: Send {
    /// Wait for the next matching event.
    ///
    /// Returns `None` once the feed is closed or the subscription has been
    /// released.
    async fn next_event(&mut self) -> Option<StoryEvent>;

    /// Explicitly release the registration.
    fn unsubscribe(self: Box<Self>);
}

/// Publish/subscribe channel keyed by record identity.
pub trait ChangeFeed: Send + Sync {
    /// Register for events matching the filter, from this moment forward.
    fn subscribe(&self, filter: EventFilter) -> Box<dyn Subscription>;

    /// Push an event to all current subscribers.
    fn publish(&self, event: StoryEvent);
}

/// Verifies a bearer credential against the managed session service.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Resolve the credential to the authenticated user's id.
    ///
    /// Fails with an `AuthError` for missing, expired, or malformed
    /// credentials.
    async fn verify(&self, bearer_token: &str) -> TaleweaverResult<String>;
}
