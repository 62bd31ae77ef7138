//! Diesel schema for the stories table.

diesel::table! {
    /// One row per generated story.
    stories (id) {
        /// Assigned by the store (`gen_random_uuid()`)
        id -> Uuid,
        /// Derived title, immutable after creation
        title -> Text,
        /// Prose body
        text -> Text,
        /// Language tag
        lang -> Text,
        /// Placeholder at creation, replaced by enrichment
        image_url -> Nullable<Text>,
        /// Null until narration is requested
        audio_url -> Nullable<Text>,
        /// Owner of the story
        user_id -> Text,
        /// Assignment timestamp, set by the store
        created_at -> Timestamptz,
    }
}
