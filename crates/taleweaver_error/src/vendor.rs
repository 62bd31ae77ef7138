//! Third-party vendor error types.

/// Kinds of vendor errors.
///
/// A vendor is any third-party generative AI HTTP API (text, image, or
/// speech). Adapters never retry; failures surface to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum VendorErrorKind {
    /// The request never reached the vendor (connection, TLS, timeout)
    #[display("Request failed: {}", _0)]
    Http(String),
    /// The vendor returned a non-success status
    #[display("API error ({}): {}", status, message)]
    Api {
        /// HTTP status code returned by the vendor
        status: u16,
        /// Response body or vendor-supplied message
        message: String,
    },
    /// The vendor responded 2xx but the envelope was not the expected shape
    #[display("Unexpected response: {}", _0)]
    UnexpectedResponse(String),
    /// The vendor returned success with no usable payload
    #[display("Empty response: {}", _0)]
    Empty(String),
}

/// Vendor error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{VendorError, VendorErrorKind};
///
/// let err = VendorError::new(
///     "elevenlabs",
///     VendorErrorKind::Api { status: 429, message: "rate limited".into() },
/// );
/// assert_eq!(err.vendor, "elevenlabs");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Vendor Error [{}]: {} at line {} in {}", vendor, kind, line, file)]
pub struct VendorError {
    /// Which vendor failed (e.g. "gemini", "imagen", "elevenlabs")
    pub vendor: &'static str,
    /// The kind of error that occurred
    pub kind: VendorErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VendorError {
    /// Create a new vendor error with automatic location tracking.
    #[track_caller]
    pub fn new(vendor: &'static str, kind: VendorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            vendor,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
