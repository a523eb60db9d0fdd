//! Query API action names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An SES query API action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Send a message built from structured fields.
    SendEmail,
    /// Send a pre-built MIME document.
    SendRawEmail,
    /// List verified and pending identities.
    ListIdentities,
    /// Start verification of an email address.
    VerifyEmailIdentity,
    /// Remove an identity from the account.
    DeleteIdentity,
    /// Read verification status for a set of identities.
    GetIdentityVerificationAttributes,
    /// Read the account's sending limits.
    GetSendQuota,
    /// Read sending statistics for the last two weeks.
    GetSendStatistics,
}

impl Action {
    /// Returns the action name sent as the `Action` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SendEmail => "SendEmail",
            Action::SendRawEmail => "SendRawEmail",
            Action::ListIdentities => "ListIdentities",
            Action::VerifyEmailIdentity => "VerifyEmailIdentity",
            Action::DeleteIdentity => "DeleteIdentity",
            Action::GetIdentityVerificationAttributes => "GetIdentityVerificationAttributes",
            Action::GetSendQuota => "GetSendQuota",
            Action::GetSendStatistics => "GetSendStatistics",
        }
    }

    /// The HTTP method the action is sent with.
    ///
    /// Sends are `POST`; every read and identity operation is `GET`.
    pub fn method(&self) -> http::Method {
        match self {
            Action::SendEmail | Action::SendRawEmail => http::Method::POST,
            _ => http::Method::GET,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
