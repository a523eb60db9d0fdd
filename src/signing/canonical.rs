//! Canonical request building for AWS Signature V4.
//!
//! The query API carries every parameter in the query string and never sends a
//! body, so the canonical form is fixed: the path is always `/`, the query
//! string is the sorted parameter set, and exactly two headers are signed.

use crate::types::ParameterSet;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters that should NOT be percent-encoded in query strings.
///
/// Only the RFC 3986 unreserved set survives: A-Z, a-z, 0-9, `-`, `_`, `.`, `~`.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The signed headers list, always these two in this order.
pub const SIGNED_HEADERS: &str = "host;x-amz-date";

/// URI-encode a query component.
///
/// Spaces become `%20` (never `+`), slashes are encoded, and multi-byte
/// characters are encoded byte by byte with uppercase hex digits.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::uri_encode;
///
/// assert_eq!(uri_encode("hello world"), "hello%20world");
/// assert_eq!(uri_encode("value/with/slash"), "value%2Fwith%2Fslash");
/// assert_eq!(uri_encode("a-b_c.d~e"), "a-b_c.d~e");
/// ```
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_SET).to_string()
}

/// Build a canonical query string from a parameter set.
///
/// Keys are visited in ascending byte order of the *unencoded* key, then each
/// key and value is encoded and joined as `key=value` pairs separated by `&`.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::canonical_query_string;
/// use integrations_aws_ses_query::types::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.insert("Source".to_string(), "a".to_string());
/// params.insert("Action".to_string(), "SendEmail".to_string());
///
/// assert_eq!(canonical_query_string(&params), "Action=SendEmail&Source=a");
/// ```
pub fn canonical_query_string(parameters: &ParameterSet) -> String {
    parameters
        .iter()
        .map(|(key, value)| format!("{}={}", uri_encode(key), uri_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block.
///
/// Each line is `\n`-terminated, so the block already ends in a newline.
pub fn canonical_headers(host: &str, amz_date: &str) -> String {
    format!("host:{}\nx-amz-date:{}\n", host, amz_date)
}
