//! AWS Signature Version 4 implementation for the SES query API.
//!
//! Signing is a pure function of the credentials, one [`SigningRequest`] value
//! and one [`SigningContext`]:
//! 1. The action is merged into a local copy of the parameters
//! 2. A canonical request is built from the sorted, encoded parameters
//! 3. A string to sign is built from the canonical request hash
//! 4. A signing key is derived from the secret key through an HMAC chain
//! 5. The signature and the `Authorization` header value are produced
//!
//! Reference: https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html

use super::canonical::{canonical_headers, canonical_query_string, SIGNED_HEADERS};
use super::context::SigningContext;
use super::error::SigningError;
use crate::credentials::AwsCredentials;
use crate::types::ParameterSet;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// AWS Signature V4 algorithm identifier.
pub const AWS_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name used in the credential scope and endpoint host.
pub const SES_SERVICE: &str = "email";

/// SHA-256 of the empty payload. Query API requests never carry a body.
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const SERVICE_DOMAIN: &str = "amazonaws.com";

/// Everything that varies between two signed query API calls.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::SigningRequest;
///
/// let request = SigningRequest::new("GET", "us-west-2", "GetSendQuota");
/// assert_eq!(request.host(), "email.us-west-2.amazonaws.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method (`GET` or `POST`).
    pub method: String,
    /// AWS region (e.g., "us-east-1").
    pub region: String,
    /// Service name, `email` unless overridden.
    pub service: String,
    /// Explicit host header, when the endpoint is not the regional default.
    pub host: Option<String>,
    /// Action name merged into the parameters as `Action`.
    pub action: String,
    /// Request parameters, excluding `Action` unless the caller supplies it.
    pub parameters: ParameterSet,
}

impl SigningRequest {
    /// Create a request for the given method, region and action.
    pub fn new(
        method: impl Into<String>,
        region: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            region: region.into(),
            service: SES_SERVICE.to_string(),
            host: None,
            action: action.into(),
            parameters: ParameterSet::new(),
        }
    }

    /// Override the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Override the host header.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Replace the parameter set.
    pub fn with_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add one parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The host header value: the override, or `<service>.<region>.amazonaws.com`.
    pub fn host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| format!("{}.{}.{}", self.service, self.region, SERVICE_DOMAIN))
    }

    fn validate(&self) -> Result<(), SigningError> {
        if self.method.trim().is_empty() {
            return Err(SigningError::invalid_input("method"));
        }
        if self.region.trim().is_empty() {
            return Err(SigningError::invalid_input("region"));
        }
        if self.service.trim().is_empty() {
            return Err(SigningError::invalid_input("service"));
        }
        if self.action.trim().is_empty() && !self.parameters.contains_key("Action") {
            return Err(SigningError::invalid_input("action"));
        }
        Ok(())
    }
}

/// The values a transport needs to send a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureOutput {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `x-amz-date` header.
    pub amz_date: String,
    /// Canonical query string, appended to the endpoint after `/?`.
    pub canonical_query: String,
}

/// Calculate SHA-256 hash of data and return as hex string.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::sha256_hex;
///
/// assert_eq!(
///     sha256_hex(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, SigningError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SigningError::failed(format!("cannot key HMAC-SHA256: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the signing key for AWS Signature V4.
///
/// 1. kDate = HMAC("AWS4" + SecretKey, Date)
/// 2. kRegion = HMAC(kDate, Region)
/// 3. kService = HMAC(kRegion, Service)
/// 4. kSigning = HMAC(kService, "aws4_request")
///
/// Intermediate keys are raw bytes and are wiped when dropped.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::derive_signing_key;
///
/// let key = derive_signing_key(
///     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
///     "20120215",
///     "us-east-1",
///     "iam",
/// ).unwrap();
/// assert_eq!(key.len(), 32);
/// ```
pub fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Zeroizing<Vec<u8>>, SigningError> {
    let k_secret = Zeroizing::new(format!("AWS4{}", secret_key));
    let k_date = Zeroizing::new(hmac_sha256(k_secret.as_bytes(), date_stamp.as_bytes())?);
    let k_region = Zeroizing::new(hmac_sha256(&k_date, region.as_bytes())?);
    let k_service = Zeroizing::new(hmac_sha256(&k_region, service.as_bytes())?);
    Ok(Zeroizing::new(hmac_sha256(&k_service, b"aws4_request")?))
}

/// Build the credential scope string.
///
/// Format: `{date}/{region}/{service}/aws4_request`
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::build_credential_scope;
///
/// let scope = build_credential_scope("20231215", "us-east-1", "email");
/// assert_eq!(scope, "20231215/us-east-1/email/aws4_request");
/// ```
pub fn build_credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{}/{}/{}/aws4_request", date_stamp, region, service)
}

/// Build a canonical request.
///
/// `canonical_headers` already ends with a newline, which is what produces
/// the blank line before the signed headers.
fn build_canonical_request(method: &str, canonical_query: &str, canonical_headers: &str) -> String {
    format!(
        "{}\n/\n{}\n{}\n{}\n{}",
        method, canonical_query, canonical_headers, SIGNED_HEADERS, EMPTY_PAYLOAD_SHA256
    )
}

fn build_string_to_sign(amz_date: &str, credential_scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        AWS_ALGORITHM, amz_date, credential_scope, canonical_request_hash
    )
}

fn calculate_signature(
    secret_key: &str,
    context: &SigningContext,
    credential_scope: &str,
    region: &str,
    service: &str,
    canonical_request: &str,
) -> Result<String, SigningError> {
    let string_to_sign = build_string_to_sign(
        context.timestamp(),
        credential_scope,
        &sha256_hex(canonical_request.as_bytes()),
    );
    let signing_key = derive_signing_key(secret_key, context.date(), region, service)?;
    Ok(hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?))
}

/// Sign a query API request using AWS Signature V4.
///
/// The caller's parameters are never modified; `Action` is merged into a local
/// copy when it is not already present.
///
/// # Errors
///
/// Returns [`SigningError::InvalidInput`] if the method, region or service is
/// empty, or if no action is available from either the request or its
/// parameters.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::credentials::AwsCredentials;
/// use integrations_aws_ses_query::signing::{sign, SigningContext, SigningRequest};
/// use chrono::{TimeZone, Utc};
///
/// let credentials = AwsCredentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
/// let request = SigningRequest::new("GET", "us-east-1", "GetSendQuota");
/// let context = SigningContext::at(&Utc.with_ymd_and_hms(2023, 12, 15, 10, 30, 45).unwrap());
///
/// let output = sign(&credentials, &request, &context)?;
/// assert_eq!(output.canonical_query, "Action=GetSendQuota");
/// assert_eq!(output.amz_date, "20231215T103045Z");
/// assert!(output.authorization.starts_with(
///     "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20231215/us-east-1/email/aws4_request, "
/// ));
/// # Ok::<(), integrations_aws_ses_query::signing::SigningError>(())
/// ```
pub fn sign(
    credentials: &AwsCredentials,
    request: &SigningRequest,
    context: &SigningContext,
) -> Result<SignatureOutput, SigningError> {
    request.validate()?;

    let mut parameters = request.parameters.clone();
    parameters
        .entry("Action".to_string())
        .or_insert_with(|| request.action.clone());

    let canonical_query = canonical_query_string(&parameters);
    let headers = canonical_headers(&request.host(), context.timestamp());
    let canonical_request = build_canonical_request(&request.method, &canonical_query, &headers);

    let credential_scope =
        build_credential_scope(context.date(), &request.region, &request.service);
    let signature = calculate_signature(
        credentials.secret_access_key(),
        context,
        &credential_scope,
        &request.region,
        &request.service,
        &canonical_request,
    )?;

    debug!(
        action = %parameters.get("Action").map(String::as_str).unwrap_or_default(),
        method = %request.method,
        scope = %credential_scope,
        parameter_count = parameters.len(),
        "signed query API request"
    );

    Ok(SignatureOutput {
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            AWS_ALGORITHM,
            credentials.access_key_id(),
            credential_scope,
            SIGNED_HEADERS,
            signature
        ),
        amz_date: context.timestamp().to_string(),
        canonical_query,
    })
}
