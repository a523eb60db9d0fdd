//! Signed query API requests.

use http::header::{HeaderName, HeaderValue, AUTHORIZATION, HOST};
use http::{HeaderMap, Method};
use url::Url;

use crate::signing::{SignatureOutput, SigningError};

/// Header carrying the signing timestamp.
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Header carrying the session token of temporary credentials.
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// A fully signed request, ready to hand to an HTTP client.
///
/// The body is always empty: every parameter is in the URL's query string,
/// which must be sent exactly as produced.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,

    /// Endpoint URL with the canonical query string.
    pub url: Url,

    /// `host`, `x-amz-date` and `authorization`, plus
    /// `x-amz-security-token` for temporary credentials.
    pub headers: HeaderMap,
}

impl SignedRequest {
    pub(crate) fn assemble(
        method: Method,
        endpoint: &str,
        host: &str,
        signature: SignatureOutput,
        session_token: Option<&str>,
    ) -> Result<Self, SigningError> {
        let raw_url = format!(
            "{}/?{}",
            endpoint.trim_end_matches('/'),
            signature.canonical_query
        );
        let url = Url::parse(&raw_url)
            .map_err(|e| SigningError::failed(format!("invalid request URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(HOST, header_value("host", host)?);
        headers.insert(
            HeaderName::from_static(X_AMZ_DATE),
            header_value(X_AMZ_DATE, &signature.amz_date)?,
        );
        headers.insert(
            AUTHORIZATION,
            header_value("authorization", &signature.authorization)?,
        );
        if let Some(token) = session_token {
            let mut value = header_value(X_AMZ_SECURITY_TOKEN, token)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(X_AMZ_SECURITY_TOKEN), value);
        }

        Ok(Self {
            method,
            url,
            headers,
        })
    }

    /// The canonical query string.
    pub fn query(&self) -> &str {
        self.url.query().unwrap_or_default()
    }

    /// A header value as a string, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, SigningError> {
    HeaderValue::from_str(value)
        .map_err(|_| SigningError::failed(format!("{} is not a valid header value", name)))
}
