//! Route handlers for the story pipeline endpoints.

use crate::{HttpSessionVerifier, ServerConfig};
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use taleweaver_core::{CreateStoryRequest, StoryId};
use taleweaver_error::{
    AuthError, TaleweaverError, TaleweaverErrorKind, TaleweaverResult, ValidationError,
};
use taleweaver_interface::SessionVerifier;
use taleweaver_pipeline::StoryOrchestrator;
use taleweaver_store::{establish_pool, BucketBlobStore, PgStoryRepository};
use taleweaver_vendors::{ElevenLabsClient, GeminiTextClient};
use tracing::{error, info};

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    orchestrator: StoryOrchestrator,
    verifier: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Wire the pipeline together from configuration.
    ///
    /// Every collaborator is constructed here and handed down explicitly;
    /// nothing reads the environment after this point.
    pub fn from_config(config: &ServerConfig) -> TaleweaverResult<Self> {
        let pool = establish_pool(config.database_url())?;
        let stories: Arc<dyn taleweaver_interface::StoryRepository> =
            Arc::new(PgStoryRepository::new(pool));

        let blobs: Arc<dyn taleweaver_interface::BlobStore> = Arc::new(BucketBlobStore::new(
            config.storage_url(),
            config.storage_bucket(),
            config.storage_service_key(),
        ));

        let text: Arc<dyn taleweaver_interface::TextGenerator> =
            Arc::new(GeminiTextClient::new(config.gemini_api_key()));
        let images = config.image_vendor().client(config.gemini_api_key());

        let mut orchestrator = StoryOrchestrator::new(text, images, stories, blobs);
        if let (Some(api_key), Some(voice_id)) =
            (config.elevenlabs_api_key(), config.default_voice_id())
        {
            orchestrator = orchestrator
                .with_narration(Arc::new(ElevenLabsClient::new(api_key)), voice_id);
        }

        let verifier: Arc<dyn SessionVerifier> = Arc::new(HttpSessionVerifier::new(
            config.auth_url(),
            config.auth_api_key(),
        ));

        Ok(Self {
            orchestrator,
            verifier,
        })
    }

    /// Build state from already-constructed parts.
    pub fn new(orchestrator: StoryOrchestrator, verifier: Arc<dyn SessionVerifier>) -> Self {
        Self {
            orchestrator,
            verifier,
        }
    }
}

/// Creates the pipeline router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate-story", post(generate_story).options(preflight))
        .route("/generate-image", post(generate_image).options(preflight))
        .route("/generate-audio", post(generate_audio).options(preflight))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Permissive cross-origin headers on every response.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization, x-client-info, apikey, content-type"),
    );
    response
}

/// Answer a CORS preflight request.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `Json` extractor that answers malformed bodies in the documented
/// `{"error": …}` shape with a 400 instead of axum's plain-text rejection.
struct ApiJson<T>(T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response()),
        }
    }
}

/// Pull the bearer credential out of the request headers.
fn bearer_token(headers: &HeaderMap) -> TaleweaverResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::new("missing bearer credential").into())
}

/// Map a pipeline error onto an HTTP status.
fn status_for(err: &TaleweaverError) -> StatusCode {
    match err.kind() {
        TaleweaverErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
        TaleweaverErrorKind::Auth(_) => StatusCode::UNAUTHORIZED,
        TaleweaverErrorKind::Persistence(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serialize an error the way clients expect: `{"error": …}`.
fn error_response(err: TaleweaverError) -> Response {
    error!(error = %err, "Request failed");
    (status_for(&err), Json(json!({ "error": err.to_string() }))).into_response()
}

/// Parse an opaque story id out of a request body field.
fn parse_story_id(raw: &str) -> TaleweaverResult<StoryId> {
    StoryId::from_str(raw)
        .map_err(|_| ValidationError::new(format!("storyId {raw:?} is not a valid id")).into())
}

async fn generate_story(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CreateStoryRequest>,
) -> Response {
    let result = async {
        let token = bearer_token(&headers)?;
        let session_user = state.verifier.verify(token).await?;
        state.orchestrator.create(&request, &session_user).await
    }
    .await;

    match result {
        Ok(story) => {
            info!(story_id = %story.id, "Story created");
            (StatusCode::OK, Json(story)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichImageBody {
    story_id: String,
    prompt: String,
}

async fn generate_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<EnrichImageBody>,
) -> Response {
    let result = async {
        let token = bearer_token(&headers)?;
        state.verifier.verify(token).await?;

        if body.prompt.trim().is_empty() {
            Err(ValidationError::new("prompt must not be empty"))?;
        }
        let id = parse_story_id(&body.story_id)?;
        state.orchestrator.enrich_image(id, &body.prompt).await
    }
    .await;

    match result {
        Ok(image_url) => {
            (StatusCode::OK, Json(json!({ "success": true, "imageUrl": image_url })))
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichAudioBody {
    story_id: String,
}

async fn generate_audio(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<EnrichAudioBody>,
) -> Response {
    let result = async {
        let token = bearer_token(&headers)?;
        state.verifier.verify(token).await?;

        let id = parse_story_id(&body.story_id)?;
        state.orchestrator.enrich_audio(id).await
    }
    .await;

    match result {
        Ok(audio_url) => {
            (StatusCode::OK, Json(json!({ "success": true, "audioUrl": audio_url })))
                .into_response()
        }
        Err(err) => error_response(err),
    }
}
