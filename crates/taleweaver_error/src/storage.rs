//! Blob storage error types.

/// Kinds of blob storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to upload a blob
    #[display("Upload failed: {}", _0)]
    Upload(String),
    /// The storage service rejected the request
    #[display("Storage rejected request ({}): {}", status, message)]
    Rejected {
        /// HTTP status code returned by the storage service
        status: u16,
        /// Response body or service-supplied message
        message: String,
    },
    /// Invalid blob path
    #[display("Invalid storage path: {}", _0)]
    InvalidPath(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Blob storage error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Upload("bucket missing".to_string()));
/// assert!(format!("{}", err).contains("Upload failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
