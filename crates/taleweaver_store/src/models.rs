//! Row types and conversions between the database and the domain model.

use crate::schema::stories;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::str::FromStr;
use taleweaver_core::{Language, NewStory, Story};
use taleweaver_error::{PersistenceError, PersistenceErrorKind};
use uuid::Uuid;

/// A story row as stored in Postgres.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StoryRow {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub lang: String,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Field set for inserting a new story row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stories)]
pub(crate) struct NewStoryRow {
    pub title: String,
    pub text: String,
    pub lang: String,
    pub image_url: String,
    pub user_id: String,
}

impl From<NewStory> for NewStoryRow {
    fn from(story: NewStory) -> Self {
        Self {
            title: story.title,
            text: story.text,
            lang: story.lang.tag().to_string(),
            image_url: story.image_url,
            user_id: story.user_id,
        }
    }
}

impl TryFrom<StoryRow> for Story {
    type Error = PersistenceError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        let lang = Language::from_str(&row.lang).map_err(|_| {
            PersistenceError::new(PersistenceErrorKind::Query(format!(
                "row {} carries unsupported language tag {:?}",
                row.id, row.lang
            )))
        })?;

        Ok(Story {
            id: row.id,
            title: row.title,
            text: row.text,
            lang,
            image_url: row.image_url,
            audio_url: row.audio_url,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}
