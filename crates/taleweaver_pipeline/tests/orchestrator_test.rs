//! Tests for the story generation orchestrator.

mod support;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use support::{
    InMemoryStoryRepository, MockBehavior, MockImageGenerator, MockNarrator, MockTextGenerator,
    RecordingBlobStore,
};
use taleweaver_core::{CreateStoryRequest, EnrichmentStage, Language, Story};
use taleweaver_error::TaleweaverErrorKind;
use taleweaver_interface::{ChangeFeed, EventFilter, StoryEvent, StoryRepository};
use taleweaver_pipeline::{audio_blob_path, image_blob_path, StoryOrchestrator};
use uuid::Uuid;

fn request() -> CreateStoryRequest {
    CreateStoryRequest {
        child_name: "Mia".to_string(),
        theme: "Ocean".to_string(),
        lang: Language::English,
        user_id: "user-1".to_string(),
    }
}

struct Harness {
    text: Arc<MockTextGenerator>,
    images: Arc<MockImageGenerator>,
    narrator: Arc<MockNarrator>,
    stories: Arc<InMemoryStoryRepository>,
    blobs: Arc<RecordingBlobStore>,
    orchestrator: StoryOrchestrator,
}

fn harness(text: MockBehavior, images: MockBehavior, narration: MockBehavior) -> Harness {
    let text = Arc::new(MockTextGenerator::new(text));
    let images = Arc::new(MockImageGenerator::new(images));
    let narrator = Arc::new(MockNarrator::new(narration));
    let stories = Arc::new(InMemoryStoryRepository::new());
    let blobs = Arc::new(RecordingBlobStore::new());

    let text_dyn: Arc<dyn taleweaver_interface::TextGenerator> = text.clone();
    let images_dyn: Arc<dyn taleweaver_interface::ImageGenerator> = images.clone();
    let stories_dyn: Arc<dyn StoryRepository> = stories.clone();
    let blobs_dyn: Arc<dyn taleweaver_interface::BlobStore> = blobs.clone();
    let narrator_dyn: Arc<dyn taleweaver_interface::Narrator> = narrator.clone();

    let orchestrator = StoryOrchestrator::new(text_dyn, images_dyn, stories_dyn, blobs_dyn)
        .with_narration(narrator_dyn, "test-voice");

    Harness {
        text,
        images,
        narrator,
        stories,
        blobs,
        orchestrator,
    }
}

fn generated_story() -> MockBehavior {
    MockBehavior::Success(
        "Mia sailed across the waves. Mia found a friendly dolphin, and Mia laughed all the way \
         home."
            .to_string(),
    )
}

#[tokio::test]
async fn create_returns_a_complete_story_immediately() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());

    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    assert_eq!(story.title, "Mia's Ocean Adventure");
    assert!(!story.text.is_empty());
    assert!(story.text.contains("Mia"));
    // Never a null image field on the creation response.
    let image_url = story.image_url.as_deref().unwrap();
    assert!(image_url.contains("Ocean"));
    assert!(story.audio_url.is_none());
}

#[tokio::test]
async fn create_falls_back_to_template_when_text_vendor_fails() {
    let h = harness(MockBehavior::Error, MockBehavior::Success("png".into()), generated_story());

    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    assert!(story.text.contains("Mia"));
    assert!(story.text.contains("under the sea"));
    assert_eq!(h.text.call_count(), 1);
}

#[tokio::test]
async fn create_falls_back_to_template_on_empty_prose() {
    let h = harness(MockBehavior::Empty, MockBehavior::Success("png".into()), generated_story());

    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();
    assert!(!story.text.trim().is_empty());
}

#[tokio::test]
async fn create_rejects_empty_child_name_before_any_insert() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());
    let mut req = request();
    req.child_name = String::new();

    let err = h.orchestrator.create(&req, "user-1").await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Validation(_)));
    assert_eq!(h.stories.row_count(), 0);
    assert_eq!(h.text.call_count(), 0);
}

#[tokio::test]
async fn create_rejects_empty_theme_before_any_insert() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());
    let mut req = request();
    req.theme = "  ".to_string();

    let err = h.orchestrator.create(&req, "user-1").await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Validation(_)));
    assert_eq!(h.stories.row_count(), 0);
}

#[tokio::test]
async fn create_rejects_mismatched_session_user() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());

    let err = h.orchestrator.create(&request(), "someone-else").await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Auth(_)));
    assert_eq!(h.stories.row_count(), 0);
}

#[tokio::test]
async fn create_triggers_image_enrichment_without_blocking() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());

    // Watch the feed so the fire-and-forget completion is observable.
    let feed = h.stories.feed();
    let mut sub = feed.subscribe(EventFilter::Owner("user-1".to_string()));

    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();
    assert_eq!(
        EnrichmentStage::of(&story),
        EnrichmentStage::Created,
        "creation must not wait for the image"
    );

    let enriched = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match sub.next_event().await {
                Some(StoryEvent::Updated(s))
                    if EnrichmentStage::of(&s) == EnrichmentStage::ImageReady =>
                {
                    return s;
                }
                Some(_) => continue,
                None => panic!("feed closed before enrichment"),
            }
        }
    })
    .await
    .expect("image enrichment never completed");

    assert_eq!(enriched.id, story.id);
    assert_eq!(
        enriched.image_url.as_deref().unwrap(),
        format!("https://blobs.test/{}", image_blob_path(story.id))
    );
}

#[tokio::test]
async fn image_vendor_failure_is_silent_for_the_creation_caller() {
    let h = harness(generated_story(), MockBehavior::Error, generated_story());

    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();
    let placeholder = story.image_url.clone();

    // Give the fire-and-forget task time to run and fail.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let current = h.stories.get(story.id).await.unwrap();
    assert_eq!(current.image_url, placeholder, "row must keep its placeholder");
    assert_eq!(h.images.call_count(), 1);
    assert_eq!(h.blobs.upload_count(), 0);
}

#[tokio::test]
async fn enrich_image_failure_leaves_the_row_unchanged() {
    let h = harness(generated_story(), MockBehavior::Error, generated_story());
    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();
    let before = h.stories.get(story.id).await.unwrap();

    let err = h.orchestrator.enrich_image(story.id, "prompt").await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Vendor(_)));

    let after = h.stories.get(story.id).await.unwrap();
    assert_eq!(before.image_url, after.image_url);
}

#[tokio::test]
async fn repeated_image_enrichment_leaves_some_valid_url() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());
    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    let first = h.orchestrator.enrich_image(story.id, "prompt").await.unwrap();
    let second = h.orchestrator.enrich_image(story.id, "prompt").await.unwrap();

    let current = h.stories.get(story.id).await.unwrap();
    let url = current.image_url.unwrap();
    // Last writer wins; the test asserts a valid URL, not a specific one.
    assert!(url == first || url == second);
    assert_eq!(EnrichmentStage::of(&h.stories.get(story.id).await.unwrap()),
        EnrichmentStage::ImageReady);
}

#[tokio::test]
async fn enrich_audio_sets_and_keeps_a_nonnull_url() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());
    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    let first = h.orchestrator.enrich_audio(story.id).await.unwrap();
    assert_eq!(first, format!("https://blobs.test/{}", audio_blob_path(story.id)));

    // Replaying narration re-runs the vendor call and never nulls the URL.
    let second = h.orchestrator.enrich_audio(story.id).await.unwrap();
    assert_eq!(h.narrator.call_count(), 2);

    let current = h.stories.get(story.id).await.unwrap();
    assert_eq!(current.audio_url.as_deref(), Some(second.as_str()));
}

#[tokio::test]
async fn enrich_audio_rejects_empty_text_before_any_vendor_call() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());

    let empty = Story {
        id: Uuid::new_v4(),
        title: "Mia's Ocean Adventure".to_string(),
        text: String::new(),
        lang: Language::English,
        image_url: None,
        audio_url: None,
        user_id: "user-1".to_string(),
        created_at: Utc::now(),
    };
    h.stories.seed(empty.clone());

    let err = h.orchestrator.enrich_audio(empty.id).await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Validation(_)));
    assert_eq!(h.narrator.call_count(), 0);
    assert_eq!(h.blobs.upload_count(), 0);
}

#[tokio::test]
async fn enrich_audio_surfaces_vendor_failures() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), MockBehavior::Error);
    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    let err = h.orchestrator.enrich_audio(story.id).await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Vendor(_)));

    let current = h.stories.get(story.id).await.unwrap();
    assert!(current.audio_url.is_none());
}

#[tokio::test]
async fn enrich_audio_without_narration_config_fails_fast() {
    let text: Arc<dyn taleweaver_interface::TextGenerator> =
        Arc::new(MockTextGenerator::new(generated_story()));
    let images: Arc<dyn taleweaver_interface::ImageGenerator> =
        Arc::new(MockImageGenerator::new(MockBehavior::Success("png".into())));
    let stories = Arc::new(InMemoryStoryRepository::new());
    let stories_dyn: Arc<dyn StoryRepository> = stories.clone();
    let blobs: Arc<dyn taleweaver_interface::BlobStore> = Arc::new(RecordingBlobStore::new());
    let orchestrator = StoryOrchestrator::new(text, images, stories_dyn, blobs);

    let story = orchestrator.create(&request(), "user-1").await.unwrap();
    let err = orchestrator.enrich_audio(story.id).await.unwrap_err();
    assert!(matches!(err.kind(), TaleweaverErrorKind::Config(_)));
}

#[tokio::test]
async fn deletion_is_terminal() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());
    let story = h.orchestrator.create(&request(), "user-1").await.unwrap();

    h.orchestrator.delete(story.id).await.unwrap();

    let err = h.orchestrator.get(story.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn library_lists_only_the_owners_stories() {
    let h = harness(generated_story(), MockBehavior::Success("png".into()), generated_story());

    h.orchestrator.create(&request(), "user-1").await.unwrap();
    let mut other = request();
    other.user_id = "user-2".to_string();
    h.orchestrator.create(&other, "user-2").await.unwrap();

    let library = h.orchestrator.library("user-1").await.unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library[0].user_id, "user-1");
}
