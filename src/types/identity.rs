//! Identity types and format checks for the identity management actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when an identity argument has the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The value is not an email address.
    #[error("Invalid email address: {value}")]
    InvalidEmail {
        /// The rejected value.
        value: String,
    },

    /// The value is neither an email address nor a domain.
    #[error("Identity must be an email address or a domain: {value}")]
    InvalidIdentity {
        /// The rejected value.
        value: String,
    },

    /// The value is not a known identity type.
    #[error("IdentityType must be EmailAddress or Domain, got {value}")]
    InvalidIdentityType {
        /// The rejected value.
        value: String,
    },
}

/// Type of identity accepted by `ListIdentities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityType {
    /// Email address identity.
    EmailAddress,
    /// Domain identity.
    Domain,
}

impl IdentityType {
    /// Returns the string representation for the SES API.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityType::EmailAddress => "EmailAddress",
            IdentityType::Domain => "Domain",
        }
    }
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EmailAddress" => Ok(IdentityType::EmailAddress),
            "Domain" => Ok(IdentityType::Domain),
            other => Err(FormatError::InvalidIdentityType {
                value: other.to_string(),
            }),
        }
    }
}

/// Returns `true` for a plausible `local@domain.tld` address.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::types::is_email_address;
///
/// assert!(is_email_address("user@example.com"));
/// assert!(!is_email_address("Name <user@example.com>"));
/// assert!(!is_email_address("user@localhost"));
/// ```
pub fn is_email_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    !local.is_empty()
        && !local.contains(|c: char| c == '<' || c == '>')
        && domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Returns `true` for a lowercase DNS domain such as `mail.example.com`.
///
/// Labels are runs of `a-z0-9` joined by single hyphens, and the final label
/// is at least two letters.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::types::is_domain;
///
/// assert!(is_domain("example.com"));
/// assert!(is_domain("my-mail.example.co"));
/// assert!(!is_domain("Example.com"));
/// assert!(!is_domain("example"));
/// ```
pub fn is_domain(value: &str) -> bool {
    let labels: Vec<&str> = value.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    if rest.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_lowercase()) {
        return false;
    }

    rest.iter().all(|label| {
        label.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
    })
}

/// Check that a value is an email address.
pub fn validate_email_address(value: &str) -> Result<(), FormatError> {
    if is_email_address(value) {
        Ok(())
    } else {
        Err(FormatError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

/// Check that a value is a domain.
pub fn validate_domain(value: &str) -> Result<(), FormatError> {
    if is_domain(value) {
        Ok(())
    } else {
        Err(FormatError::InvalidIdentity {
            value: value.to_string(),
        })
    }
}

/// Check that a value is either an email address or a domain.
pub fn validate_identity(value: &str) -> Result<(), FormatError> {
    if is_email_address(value) || is_domain(value) {
        Ok(())
    } else {
        Err(FormatError::InvalidIdentity {
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_type_from_str() {
        assert_eq!("EmailAddress".parse::<IdentityType>().unwrap(), IdentityType::EmailAddress);
        assert_eq!("Domain".parse::<IdentityType>().unwrap(), IdentityType::Domain);
        assert_eq!(
            "domain".parse::<IdentityType>().unwrap_err(),
            FormatError::InvalidIdentityType {
                value: "domain".to_string()
            }
        );
    }

    #[test]
    fn test_email_addresses() {
        assert!(is_email_address("a@x.com"));
        assert!(is_email_address("first.last+tag@sub.example.org"));

        assert!(!is_email_address(""));
        assert!(!is_email_address("@example.com"));
        assert!(!is_email_address("user@"));
        assert!(!is_email_address("user@@example.com"));
        assert!(!is_email_address("a@b@example.com"));
        assert!(!is_email_address("user @example.com"));
        assert!(!is_email_address("user@example..com"));
        assert!(!is_email_address("user@.example.com"));
    }

    #[test]
    fn test_domains() {
        assert!(is_domain("example.com"));
        assert!(is_domain("a1.b2.example.io"));
        assert!(is_domain("x-y-z.example.com"));

        assert!(!is_domain(""));
        assert!(!is_domain("com"));
        assert!(!is_domain("example.c"));
        assert!(!is_domain("example.c0m"));
        assert!(!is_domain("-example.com"));
        assert!(!is_domain("example-.com"));
        assert!(!is_domain("ex--ample.com"));
        assert!(!is_domain("example..com"));
        assert!(!is_domain("EXAMPLE.com"));
    }

    #[test]
    fn test_validate_identity() {
        assert!(validate_identity("user@example.com").is_ok());
        assert!(validate_identity("example.com").is_ok());
        assert!(matches!(
            validate_identity("not an identity"),
            Err(FormatError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_validate_email_address_error() {
        assert_eq!(
            validate_email_address("example.com").unwrap_err().to_string(),
            "Invalid email address: example.com"
        );
        assert!(validate_domain("example.com").is_ok());
    }
}
