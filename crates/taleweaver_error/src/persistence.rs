//! Story record store error types.

/// Kinds of persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Failed to obtain a database connection
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// Insert failed; no row was written
    #[display("Insert failed: {}", _0)]
    Insert(String),
    /// Update failed; the row keeps its prior state
    #[display("Update failed: {}", _0)]
    Update(String),
    /// Query failed
    #[display("Query failed: {}", _0)]
    Query(String),
    /// Delete failed
    #[display("Delete failed: {}", _0)]
    Delete(String),
    /// No story exists for the given id
    #[display("Story not found: {}", _0)]
    NotFound(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::NotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error is a missing-row condition.
    ///
    /// Observers treat a missing row as "story gone", not as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::NotFound(_))
    }
}
