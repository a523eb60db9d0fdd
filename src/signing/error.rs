//! Signing error types for the SES query API.
//!
//! These errors are raised before any signature is produced, so a request that
//! fails here never leaves the process with a malformed `Authorization` header.

use thiserror::Error;

/// Errors that can occur during AWS Signature V4 signing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// A required signing input was empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use integrations_aws_ses_query::signing::SigningError;
    ///
    /// let error = SigningError::InvalidInput {
    ///     field: "region".to_string(),
    /// };
    /// assert_eq!(error.to_string(), "Invalid signing input: region must not be empty");
    /// ```
    #[error("Invalid signing input: {field} must not be empty")]
    InvalidInput {
        /// The name of the empty input.
        field: String,
    },

    /// The signing operation failed.
    ///
    /// Raised when the HMAC cannot be keyed or a computed value cannot be
    /// represented as an HTTP header.
    #[error("Signing failed: {message}")]
    SigningFailed {
        /// Details about the signing failure.
        message: String,
    },
}

impl SigningError {
    pub(crate) fn invalid_input(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
        }
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self::SigningFailed {
            message: message.into(),
        }
    }
}
