//! Input validation error types.

/// Validation error raised before any mutation takes place.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Description of the rejected input
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::ValidationError;
    ///
    /// let err = ValidationError::new("theme must not be empty");
    /// assert!(err.message.contains("theme"));
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
