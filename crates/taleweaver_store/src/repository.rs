//! Database-backed story repository.
//!
//! Every query runs on the blocking pool; after a committed mutation the
//! repository publishes the row event so subscribed observers see the
//! change without polling.

use crate::connection::PgPool;
use crate::models::{NewStoryRow, StoryRow};
use crate::schema::stories::dsl;
use crate::BroadcastChangeFeed;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use taleweaver_core::{NewStory, Story, StoryId};
use taleweaver_error::{
    PersistenceError, PersistenceErrorKind, TaleweaverResult,
};
use taleweaver_interface::{ChangeFeed, StoryEvent, StoryRepository};
use tracing::{debug, instrument};

/// Postgres-backed story repository with change-feed publication.
#[derive(Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
    feed: Arc<BroadcastChangeFeed>,
}

impl PgStoryRepository {
    /// Create a repository over the given pool with a fresh change feed.
    pub fn new(pool: PgPool) -> Self {
        Self::with_feed(pool, Arc::new(BroadcastChangeFeed::new()))
    }

    /// Create a repository that publishes to an existing feed.
    pub fn with_feed(pool: PgPool, feed: Arc<BroadcastChangeFeed>) -> Self {
        Self { pool, feed }
    }

    /// The change feed this repository publishes to.
    pub fn feed(&self) -> Arc<BroadcastChangeFeed> {
        Arc::clone(&self.feed)
    }

    /// Run a blocking diesel closure on the blocking pool.
    async fn run<T, F>(&self, op: F) -> TaleweaverResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> TaleweaverResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                PersistenceError::new(PersistenceErrorKind::Connection(e.to_string()))
            })?;
            op(&mut conn)
        })
        .await
        .map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Query(e.to_string()))
        })?
    }
}

/// Map a diesel fetch error, distinguishing the missing-row case.
fn fetch_error(id: StoryId, e: diesel::result::Error) -> PersistenceError {
    match e {
        diesel::result::Error::NotFound => {
            PersistenceError::new(PersistenceErrorKind::NotFound(id.to_string()))
        }
        other => PersistenceError::new(PersistenceErrorKind::Query(other.to_string())),
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    #[instrument(skip(self, story), fields(owner = %story.user_id))]
    async fn insert(&self, story: NewStory) -> TaleweaverResult<Story> {
        let row: NewStoryRow = story.into();
        let inserted = self
            .run(move |conn| {
                let row: StoryRow = diesel::insert_into(dsl::stories)
                    .values(&row)
                    .get_result(conn)
                    .map_err(|e| {
                        PersistenceError::new(PersistenceErrorKind::Insert(e.to_string()))
                    })?;
                Ok(Story::try_from(row)?)
            })
            .await?;

        debug!(story_id = %inserted.id, "Inserted story row");
        self.feed.publish(StoryEvent::Updated(inserted.clone()));
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: StoryId) -> TaleweaverResult<Story> {
        self.run(move |conn| {
            let row: StoryRow = dsl::stories
                .find(id)
                .first(conn)
                .map_err(|e| fetch_error(id, e))?;
            Ok(Story::try_from(row)?)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_for_owner(&self, user_id: &str) -> TaleweaverResult<Vec<Story>> {
        let user_id = user_id.to_string();
        self.run(move |conn| {
            let rows: Vec<StoryRow> = dsl::stories
                .filter(dsl::user_id.eq(&user_id))
                .order(dsl::created_at.desc())
                .load(conn)
                .map_err(|e| {
                    PersistenceError::new(PersistenceErrorKind::Query(e.to_string()))
                })?;
            rows.into_iter()
                .map(|row| Ok(Story::try_from(row)?))
                .collect()
        })
        .await
    }

    #[instrument(skip(self, image_url))]
    async fn update_image_url(&self, id: StoryId, image_url: &str) -> TaleweaverResult<Story> {
        let image_url = image_url.to_string();
        let updated = self
            .run(move |conn| {
                let row: StoryRow = diesel::update(dsl::stories.find(id))
                    .set(dsl::image_url.eq(&image_url))
                    .get_result(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => fetch_error(id, e),
                        other => PersistenceError::new(PersistenceErrorKind::Update(
                            other.to_string(),
                        )),
                    })?;
                Ok(Story::try_from(row)?)
            })
            .await?;

        debug!(story_id = %id, "Updated image URL");
        self.feed.publish(StoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    #[instrument(skip(self, audio_url))]
    async fn update_audio_url(&self, id: StoryId, audio_url: &str) -> TaleweaverResult<Story> {
        let audio_url = audio_url.to_string();
        let updated = self
            .run(move |conn| {
                let row: StoryRow = diesel::update(dsl::stories.find(id))
                    .set(dsl::audio_url.eq(&audio_url))
                    .get_result(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => fetch_error(id, e),
                        other => PersistenceError::new(PersistenceErrorKind::Update(
                            other.to_string(),
                        )),
                    })?;
                Ok(Story::try_from(row)?)
            })
            .await?;

        debug!(story_id = %id, "Updated audio URL");
        self.feed.publish(StoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StoryId) -> TaleweaverResult<()> {
        self.run(move |conn| {
            let removed = diesel::delete(dsl::stories.find(id))
                .execute(conn)
                .map_err(|e| {
                    PersistenceError::new(PersistenceErrorKind::Delete(e.to_string()))
                })?;
            if removed == 0 {
                Err(PersistenceError::new(PersistenceErrorKind::NotFound(
                    id.to_string(),
                )))?;
            }
            Ok(())
        })
        .await?;

        debug!(story_id = %id, "Deleted story row");
        self.feed.publish(StoryEvent::Deleted(id));
        Ok(())
    }
}
