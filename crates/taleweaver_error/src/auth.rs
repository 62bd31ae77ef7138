//! Authorization error types.

/// Authorization error for missing or invalid sessions.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", message, line, file)]
pub struct AuthError {
    /// Why the caller was rejected
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new auth error at the current location.
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
