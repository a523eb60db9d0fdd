//! Configuration for the SES query API client.
//!
//! A configuration names the region requests are signed for, the endpoint they
//! are addressed to and where credentials come from. Nothing here performs
//! I/O beyond reading environment variables.

use std::sync::Arc;
use tracing::debug;
use url::Url;

pub mod error;

pub use error::ConfigError;

use crate::credentials::{AwsCredentials, CredentialProvider, EnvironmentCredentialProvider};

/// Region used when no region variable is set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Region variables, in lookup order.
pub const REGION_ENV_VARS: [&str; 3] = ["AWS_REGION", "AWS_DEFAULT_REGION", "REGION"];

/// Configuration for the SES client.
#[derive(Clone)]
pub struct SesConfig {
    /// AWS region (e.g., "us-east-1").
    pub region: String,

    /// Custom endpoint URL (for LocalStack or custom implementations).
    pub endpoint: Option<Url>,

    /// Credential provider consulted for every signed request.
    pub credentials_provider: Arc<dyn CredentialProvider>,
}

impl SesConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_query::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    /// # Ok::<(), integrations_aws_ses_query::config::ConfigError>(())
    /// ```
    pub fn builder() -> SesConfigBuilder {
        SesConfigBuilder::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// The region is taken from the first non-empty of `AWS_REGION`,
    /// `AWS_DEFAULT_REGION` and `REGION`, falling back to `us-east-1`.
    /// Credentials are read from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
    /// and `AWS_SESSION_TOKEN` each time a request is signed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_aws_ses_query::config::SesConfig;
    ///
    /// let config = SesConfig::from_env()?;
    /// # Ok::<(), integrations_aws_ses_query::config::ConfigError>(())
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()
            .region(resolve_region(|name| std::env::var(name).ok()))
            .credentials_provider(EnvironmentCredentialProvider::new())
            .build()
    }

    /// Get the SES endpoint URL for this configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_query::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-west-2")
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    ///
    /// assert_eq!(config.ses_endpoint(), "https://email.us-west-2.amazonaws.com");
    /// # Ok::<(), integrations_aws_ses_query::config::ConfigError>(())
    /// ```
    pub fn ses_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.as_str().trim_end_matches('/').to_string(),
            None => format!("https://email.{}.amazonaws.com", self.region),
        }
    }

    /// Host header value signed into every request.
    ///
    /// Includes the port when the endpoint override names a non-default one.
    pub fn host(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => {
                let host = endpoint.host_str().unwrap_or_default();
                match endpoint.port() {
                    Some(port) => format!("{}:{}", host, port),
                    None => host.to_string(),
                }
            }
            None => format!("email.{}.amazonaws.com", self.region),
        }
    }
}

impl std::fmt::Debug for SesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

pub(crate) fn resolve_region<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for name in REGION_ENV_VARS {
        if let Some(region) = lookup(name).filter(|r| !r.trim().is_empty()) {
            return region;
        }
    }
    debug!(region = DEFAULT_REGION, "no region variable set, using default");
    DEFAULT_REGION.to_string()
}

/// Builder for creating SES client configurations.
#[derive(Default)]
pub struct SesConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialProvider>>,
}

impl SesConfigBuilder {
    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// This is useful for testing with LocalStack or an SES-compatible service.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_query::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .endpoint("http://localhost:4566")
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    ///
    /// assert_eq!(config.host(), "localhost:4566");
    /// # Ok::<(), integrations_aws_ses_query::config::ConfigError>(())
    /// ```
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a custom credential provider.
    pub fn credentials_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    /// Set static credentials (convenience method).
    pub fn credentials(self, access_key: &str, secret_key: &str) -> Self {
        self.credentials_provider(AwsCredentials::new(access_key, secret_key))
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the region or credentials provider
    /// is not set, and `ConfigError::Invalid` if the region is blank or the
    /// endpoint is not an absolute http(s) URL without a path, query or fragment.
    pub fn build(self) -> Result<SesConfig, ConfigError> {
        let region = self.region.ok_or_else(|| ConfigError::MissingField {
            field: "region".to_string(),
        })?;

        if region.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "region must not be empty".to_string(),
            });
        }

        let credentials_provider =
            self.credentials_provider
                .ok_or_else(|| ConfigError::MissingField {
                    field: "credentials_provider".to_string(),
                })?;

        let endpoint = self.endpoint.map(|raw| parse_endpoint(&raw)).transpose()?;

        Ok(SesConfig {
            region,
            endpoint,
            credentials_provider,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        message: format!("endpoint {:?} is not a valid URL: {}", raw, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid {
            message: format!("endpoint {:?} must be an http or https URL with a host", raw),
        });
    }

    // Every request is signed for the path `/`.
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::Invalid {
            message: format!("endpoint {:?} must not have a path, query or fragment", raw),
        });
    }

    Ok(url)
}
