//! Configuration error types.

/// Configuration error for missing or malformed settings.
///
/// Raised at startup for required settings, or at call time for vendor
/// credentials that are only needed once a user triggers the feature
/// (e.g. the narration voice id).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new config error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::ConfigError;
    ///
    /// let err = ConfigError::new("ELEVENLABS_API_KEY not set");
    /// assert!(format!("{}", err).contains("ELEVENLABS_API_KEY"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
