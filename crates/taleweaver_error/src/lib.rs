//! Error types for the Taleweaver story pipeline.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use taleweaver_error::{TaleweaverResult, ValidationError};
//!
//! fn check_name(name: &str) -> TaleweaverResult<()> {
//!     if name.is_empty() {
//!         Err(ValidationError::new("childName must not be empty"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_name("Mia").is_ok());
//! assert!(check_name("").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod persistence;
mod storage;
mod validation;
mod vendor;

pub use auth::AuthError;
pub use config::ConfigError;
pub use error::{TaleweaverError, TaleweaverErrorKind, TaleweaverResult};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::ValidationError;
pub use vendor::{VendorError, VendorErrorKind};
