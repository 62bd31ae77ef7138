//! Top-level error wrapper types.

use crate::{AuthError, ConfigError, PersistenceError, StorageError, ValidationError, VendorError};

/// The foundation error enum covering every failure class in the pipeline.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverError, AuthError};
///
/// let auth_err = AuthError::new("no session");
/// let err: TaleweaverError = auth_err.into();
/// assert!(format!("{}", err).contains("Auth Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleweaverErrorKind {
    /// Bad or missing input, rejected before any mutation
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Missing or invalid session
    #[from(AuthError)]
    Auth(AuthError),
    /// Third-party AI call failed or returned an unexpected shape
    #[from(VendorError)]
    Vendor(VendorError),
    /// Story record store insert/update/select failure
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Blob upload failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Missing or malformed configuration
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Taleweaver error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverResult, ConfigError};
///
/// fn might_fail() -> TaleweaverResult<()> {
///     Err(ConfigError::new("DATABASE_URL not set"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Taleweaver Error: {}", _0)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }

    /// Whether this error is a missing-story condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), TaleweaverErrorKind::Persistence(e) if e.is_not_found())
    }
}

// Generic From implementation for any type that converts to TaleweaverErrorKind
impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Taleweaver operations.
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
