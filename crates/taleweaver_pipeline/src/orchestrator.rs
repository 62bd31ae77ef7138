//! The story generation orchestrator.

use std::sync::Arc;
use taleweaver_core::{
    fallback_story_text, image_prompt, placeholder_image_url, story_system_instruction,
    story_title, story_user_prompt, CreateStoryRequest, NewStory, Story, StoryId,
};
use taleweaver_error::{
    AuthError, ConfigError, TaleweaverResult, ValidationError,
};
use taleweaver_interface::{BlobStore, ImageGenerator, Narrator, StoryRepository, TextGenerator};
use tracing::{debug, info, instrument, warn};

/// Blob path for a story's illustration.
pub fn image_blob_path(id: StoryId) -> String {
    format!("{id}.png")
}

/// Blob path for a story's narration audio.
pub fn audio_blob_path(id: StoryId) -> String {
    format!("stories/audio/{id}.mp3")
}

/// Coordinates the adapters and stores to go from a creation request to a
/// fully enriched story record.
///
/// Every collaborator is an explicit dependency received at construction;
/// there is no ambient client handle. The orchestrator holds no per-story
/// state: each call is an independent, request-scoped unit of work.
#[derive(Clone)]
pub struct StoryOrchestrator {
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    stories: Arc<dyn StoryRepository>,
    blobs: Arc<dyn BlobStore>,
    narrator: Option<Arc<dyn Narrator>>,
    voice_id: Option<String>,
}

impl StoryOrchestrator {
    /// Create an orchestrator without narration support.
    ///
    /// Narration is configured separately with [`with_narration`] because
    /// the voice credential is only required once a user asks for audio.
    ///
    /// [`with_narration`]: StoryOrchestrator::with_narration
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        stories: Arc<dyn StoryRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            text,
            images,
            stories,
            blobs,
            narrator: None,
            voice_id: None,
        }
    }

    /// Add a narration vendor and the fixed voice to narrate with.
    pub fn with_narration(
        mut self,
        narrator: Arc<dyn Narrator>,
        voice_id: impl Into<String>,
    ) -> Self {
        self.narrator = Some(narrator);
        self.voice_id = Some(voice_id.into());
        self
    }

    /// Create a story and return it without waiting for enrichment.
    ///
    /// Validates the request and the caller's identity before any store
    /// mutation, obtains prose (falling back to the theme template when the
    /// text adapter fails or returns nothing), inserts the row with a
    /// placeholder image, and returns it. Image enrichment is then
    /// triggered fire-and-forget: its failure is logged, never surfaced —
    /// the caller already has a usable story.
    #[instrument(skip(self, request), fields(owner = %request.user_id))]
    pub async fn create(
        &self,
        request: &CreateStoryRequest,
        session_user: &str,
    ) -> TaleweaverResult<Story> {
        request.validate()?;
        if session_user.is_empty() || session_user != request.user_id {
            Err(AuthError::new("requester does not match the session user"))?;
        }

        let title = story_title(&request.child_name, &request.theme);
        let text = self.generate_text(request).await;

        let story = self
            .stories
            .insert(NewStory {
                title,
                text,
                lang: request.lang,
                image_url: placeholder_image_url(&request.theme),
                user_id: request.user_id.clone(),
            })
            .await?;

        info!(story_id = %story.id, "Created story");
        self.trigger_image_enrichment(
            story.id,
            image_prompt(&request.child_name, &request.theme),
        );

        Ok(story)
    }

    /// Generate prose, falling back to the deterministic template.
    async fn generate_text(&self, request: &CreateStoryRequest) -> String {
        let system = story_system_instruction(request.lang);
        let prompt = story_user_prompt(&request.child_name, &request.theme);

        match self.text.generate(&system, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Text adapter returned empty prose; using theme template");
                fallback_story_text(&request.child_name, &request.theme)
            }
            Err(e) => {
                warn!(error = %e, "Text adapter failed; using theme template");
                fallback_story_text(&request.child_name, &request.theme)
            }
        }
    }

    /// Issue the best-effort, non-blocking image enrichment trigger.
    fn trigger_image_enrichment(&self, id: StoryId, prompt: String) {
        let this = self.clone();
        tokio::spawn(async move {
            if let Err(e) = this.enrich_image(id, &prompt).await {
                warn!(story_id = %id, error = %e, "Image enrichment trigger failed");
            }
        });
    }

    /// Generate an illustration, upload it, and replace the story's
    /// placeholder image URL.
    ///
    /// No retry and no idempotency token: concurrent calls for the same
    /// story race, and the last committed update wins. On any failure the
    /// row keeps its prior image URL.
    #[instrument(skip(self, prompt))]
    pub async fn enrich_image(&self, id: StoryId, prompt: &str) -> TaleweaverResult<String> {
        debug!("Generating illustration");
        let media = self.images.generate(prompt).await?;

        let path = image_blob_path(id);
        self.blobs.upload(&path, &media.bytes, &media.mime_type).await?;
        let image_url = self.blobs.public_url(&path);

        self.stories.update_image_url(id, &image_url).await?;
        info!(story_id = %id, "Story image enriched");
        Ok(image_url)
    }

    /// Narrate the story's text and set its audio URL.
    ///
    /// User-initiated: every failure surfaces to the caller. Fails fast on
    /// missing narration configuration or empty story text, before any
    /// vendor call. Re-triggering re-runs the vendor call and overwrites
    /// the prior audio at the same blob path.
    #[instrument(skip(self))]
    pub async fn enrich_audio(&self, id: StoryId) -> TaleweaverResult<String> {
        let narrator = self.narrator.as_ref().ok_or_else(|| {
            ConfigError::new("narration vendor is not configured")
        })?;
        let voice_id = self.voice_id.as_ref().ok_or_else(|| {
            ConfigError::new("narration voice id is not configured")
        })?;

        let story = self.stories.get(id).await?;
        if story.text.trim().is_empty() {
            Err(ValidationError::new(
                "story has no text content to narrate",
            ))?;
        }

        debug!(text_len = story.text.len(), "Generating narration");
        let media = narrator.narrate(&story.text, voice_id).await?;

        let path = audio_blob_path(id);
        self.blobs.upload(&path, &media.bytes, &media.mime_type).await?;
        let audio_url = self.blobs.public_url(&path);

        self.stories.update_audio_url(id, &audio_url).await?;
        info!(story_id = %id, "Story narration enriched");
        Ok(audio_url)
    }

    /// Fetch a story by id.
    pub async fn get(&self, id: StoryId) -> TaleweaverResult<Story> {
        self.stories.get(id).await
    }

    /// All stories owned by a user, newest first.
    pub async fn library(&self, user_id: &str) -> TaleweaverResult<Vec<Story>> {
        self.stories.list_for_owner(user_id).await
    }

    /// Delete a story. Terminal: observers see a delete event.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: StoryId) -> TaleweaverResult<()> {
        self.stories.delete(id).await
    }
}
