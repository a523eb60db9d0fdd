//! Environment variable credentials provider.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use std::env;

/// Environment variable names for AWS credentials.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Optional session token variable.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// This provider looks for the following environment variables:
/// - `AWS_ACCESS_KEY_ID`: The access key ID (required)
/// - `AWS_SECRET_ACCESS_KEY`: The secret access key (required)
/// - `AWS_SESSION_TOKEN`: Optional session token for temporary credentials
///
/// Variables are read on every call.
///
/// # Example
///
/// ```no_run
/// use integrations_aws_ses_query::credentials::{CredentialProvider, EnvironmentCredentialProvider};
///
/// let provider = EnvironmentCredentialProvider::new();
/// let credentials = provider.credentials()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentialProvider;

impl EnvironmentCredentialProvider {
    /// Create a new environment credentials provider.
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn load<F>(lookup: F) -> Result<AwsCredentials, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key_id = lookup(AWS_ACCESS_KEY_ID).ok_or_else(|| CredentialError::Missing {
            message: format!("{} environment variable not set", AWS_ACCESS_KEY_ID),
        })?;

        if access_key_id.is_empty() {
            return Err(CredentialError::Invalid {
                message: format!("{} is empty", AWS_ACCESS_KEY_ID),
            });
        }

        let secret_access_key =
            lookup(AWS_SECRET_ACCESS_KEY).ok_or_else(|| CredentialError::Missing {
                message: format!("{} environment variable not set", AWS_SECRET_ACCESS_KEY),
            })?;

        if secret_access_key.is_empty() {
            return Err(CredentialError::Invalid {
                message: format!("{} is empty", AWS_SECRET_ACCESS_KEY),
            });
        }

        let credentials = AwsCredentials::new(access_key_id, secret_access_key);

        Ok(match lookup(AWS_SESSION_TOKEN).filter(|s| !s.is_empty()) {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        })
    }
}

impl CredentialProvider for EnvironmentCredentialProvider {
    fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        Self::load(|name| env::var(name).ok())
    }
}
