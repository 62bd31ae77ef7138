//! Shared mocks for pipeline tests.

// Not every test binary exercises every mock.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use taleweaver_core::{GeneratedMedia, NewStory, Story, StoryId};
use taleweaver_error::{
    PersistenceError, PersistenceErrorKind, TaleweaverResult, VendorError, VendorErrorKind,
};
use taleweaver_interface::{
    BlobStore, ChangeFeed, ImageGenerator, Narrator, StoryEvent, StoryRepository, TextGenerator,
};
use taleweaver_store::BroadcastChangeFeed;
use uuid::Uuid;

/// Behavior configuration for mock vendor responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given payload
    Success(String),
    /// Always fail with a vendor error
    Error,
    /// Succeed with an empty payload
    Empty,
}

/// Mock text adapter with a call counter.
pub struct MockTextGenerator {
    behavior: MockBehavior,
    pub calls: Arc<Mutex<usize>>,
}

impl MockTextGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> TaleweaverResult<String> {
        *self.calls.lock().unwrap() += 1;
        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Error => Err(VendorError::new(
                "mock-text",
                VendorErrorKind::Api {
                    status: 500,
                    message: "mock failure".to_string(),
                },
            ))?,
        }
    }

    fn vendor_name(&self) -> &'static str {
        "mock-text"
    }
}

/// Mock image adapter with a call counter.
pub struct MockImageGenerator {
    behavior: MockBehavior,
    pub calls: Arc<Mutex<usize>>,
}

impl MockImageGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, _prompt: &str) -> TaleweaverResult<GeneratedMedia> {
        *self.calls.lock().unwrap() += 1;
        match &self.behavior {
            MockBehavior::Success(payload) => Ok(GeneratedMedia::new(
                payload.clone().into_bytes(),
                "image/png",
            )),
            MockBehavior::Empty => Ok(GeneratedMedia::new(Vec::new(), "image/png")),
            MockBehavior::Error => Err(VendorError::new(
                "mock-image",
                VendorErrorKind::Api {
                    status: 503,
                    message: "mock failure".to_string(),
                },
            ))?,
        }
    }

    fn vendor_name(&self) -> &'static str {
        "mock-image"
    }
}

/// Mock narration adapter with a call counter.
pub struct MockNarrator {
    behavior: MockBehavior,
    pub calls: Arc<Mutex<usize>>,
}

impl MockNarrator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Narrator for MockNarrator {
    async fn narrate(&self, _text: &str, _voice_id: &str) -> TaleweaverResult<GeneratedMedia> {
        *self.calls.lock().unwrap() += 1;
        match &self.behavior {
            MockBehavior::Success(payload) => Ok(GeneratedMedia::new(
                payload.clone().into_bytes(),
                "audio/mp3",
            )),
            MockBehavior::Empty => Ok(GeneratedMedia::new(Vec::new(), "audio/mp3")),
            MockBehavior::Error => Err(VendorError::new(
                "mock-narrator",
                VendorErrorKind::Api {
                    status: 500,
                    message: "mock failure".to_string(),
                },
            ))?,
        }
    }

    fn vendor_name(&self) -> &'static str {
        "mock-narrator"
    }
}

/// In-memory story repository that publishes events like the real one.
pub struct InMemoryStoryRepository {
    rows: Mutex<HashMap<StoryId, Story>>,
    feed: Arc<BroadcastChangeFeed>,
}

impl InMemoryStoryRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            feed: Arc::new(BroadcastChangeFeed::new()),
        }
    }

    pub fn feed(&self) -> Arc<BroadcastChangeFeed> {
        Arc::clone(&self.feed)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Insert a fully specified row directly, bypassing the orchestrator.
    pub fn seed(&self, story: Story) {
        self.rows.lock().unwrap().insert(story.id, story);
    }

    fn not_found(id: StoryId) -> PersistenceError {
        PersistenceError::new(PersistenceErrorKind::NotFound(id.to_string()))
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn insert(&self, story: NewStory) -> TaleweaverResult<Story> {
        let row = Story {
            id: Uuid::new_v4(),
            title: story.title,
            text: story.text,
            lang: story.lang,
            image_url: Some(story.image_url),
            audio_url: None,
            user_id: story.user_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        self.feed.publish(StoryEvent::Updated(row.clone()));
        Ok(row)
    }

    async fn get(&self, id: StoryId) -> TaleweaverResult<Story> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn list_for_owner(&self, user_id: &str) -> TaleweaverResult<Vec<Story>> {
        let mut stories: Vec<Story> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    async fn update_image_url(&self, id: StoryId, image_url: &str) -> TaleweaverResult<Story> {
        let updated = {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
            row.image_url = Some(image_url.to_string());
            row.clone()
        };
        self.feed.publish(StoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    async fn update_audio_url(&self, id: StoryId, audio_url: &str) -> TaleweaverResult<Story> {
        let updated = {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
            row.audio_url = Some(audio_url.to_string());
            row.clone()
        };
        self.feed.publish(StoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    async fn delete(&self, id: StoryId) -> TaleweaverResult<()> {
        let removed = self.rows.lock().unwrap().remove(&id);
        if removed.is_none() {
            Err(Self::not_found(id))?;
        }
        self.feed.publish(StoryEvent::Deleted(id));
        Ok(())
    }
}

/// Blob store that records uploads and never fails.
pub struct RecordingBlobStore {
    pub uploads: Mutex<Vec<(String, String)>>,
}

impl RecordingBlobStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn upload(
        &self,
        path: &str,
        _bytes: &[u8],
        content_type: &str,
    ) -> TaleweaverResult<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((path.to_string(), content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://blobs.test/{path}")
    }
}
