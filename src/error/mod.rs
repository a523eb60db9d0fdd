//! Error types for the SES query API crate.
//!
//! Each component has its own error enum; [`SesError`] wraps all of them so
//! that callers composing several steps can use `?` throughout.
//!
//! # Error Hierarchy
//!
//! - [`ValidationError`]: the envelope is incomplete
//! - [`FormatError`]: an identity argument is malformed
//! - [`SigningError`]: a signing input is empty or signing failed
//! - [`ConfigError`] and [`CredentialError`]: configuration problems
//! - [`SesError::Attachment`]: an attachment file could not be read
//!
//! Nothing here is retryable; transport failures belong to the caller.
//!
//! # Examples
//!
//! ```rust
//! use integrations_aws_ses_query::envelope::{Envelope, ValidationError};
//! use integrations_aws_ses_query::error::{SesError, SesResult};
//!
//! fn build() -> SesResult<()> {
//!     Envelope::new("sender@example.com", "Subject", "Body").build()?;
//!     Ok(())
//! }
//!
//! let error = build().unwrap_err();
//! assert!(matches!(error, SesError::Validation(ValidationError::MissingDestination)));
//! assert!(error.is_client_error());
//! ```

use crate::config::ConfigError;
use crate::credentials::CredentialError;
use crate::envelope::ValidationError;
use crate::signing::SigningError;
use crate::types::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum SesError {
    /// The envelope failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An identity argument was malformed.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Request signing failed.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// The configuration is incomplete or invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Credentials could not be resolved.
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// An attachment file could not be read.
    #[error("Cannot read attachment {}: {source}", .path.display())]
    Attachment {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SesError {
    /// Whether the error was caused by the caller's input rather than the
    /// environment the crate runs in.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SesError::Validation(_)
                | SesError::Format(_)
                | SesError::Signing(SigningError::InvalidInput { .. })
        )
    }
}

/// Result alias used across the crate.
pub type SesResult<T> = Result<T, SesError>;
