//! Story creation request, with validation applied before any mutation.

use crate::Language;
use serde::{Deserialize, Serialize};
use taleweaver_error::{TaleweaverResult, ValidationError};

/// A user's "new story" submission.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{CreateStoryRequest, Language};
///
/// let req = CreateStoryRequest {
///     child_name: "Mia".to_string(),
///     theme: "Ocean".to_string(),
///     lang: Language::English,
///     user_id: "user-1".to_string(),
/// };
/// assert!(req.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    /// Name of the child the story is personalized for
    pub child_name: String,
    /// Theme keyword (e.g. "Space", "Ocean", "Forest")
    pub theme: String,
    /// Language to generate in
    pub lang: Language,
    /// Identifier of the requesting user
    pub user_id: String,
}

impl CreateStoryRequest {
    /// Reject bad or missing input before any store mutation.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the child name, theme, or user id is
    /// empty (after trimming). The language is already a parsed tag, so an
    /// unsupported value never reaches this point.
    pub fn validate(&self) -> TaleweaverResult<()> {
        if self.child_name.trim().is_empty() {
            Err(ValidationError::new("childName must not be empty"))?;
        }
        if self.theme.trim().is_empty() {
            Err(ValidationError::new("theme must not be empty"))?;
        }
        if self.user_id.trim().is_empty() {
            Err(ValidationError::new("userId must not be empty"))?;
        }
        Ok(())
    }
}
