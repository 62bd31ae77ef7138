//! Generated media payloads returned by vendor adapters.

/// Raw media bytes with their MIME type, as returned by an image or
/// narration adapter.
///
/// # Examples
///
/// ```
/// use taleweaver_core::GeneratedMedia;
///
/// let media = GeneratedMedia::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png");
/// assert_eq!(media.mime_type, "image/png");
/// assert!(!media.bytes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMedia {
    /// The raw media bytes
    pub bytes: Vec<u8>,
    /// MIME type of the bytes (e.g. "image/png", "audio/mp3")
    pub mime_type: String,
}

impl GeneratedMedia {
    /// Create a new media payload.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}
