//! Shared types for SES query API requests.
//!
//! A query API call is an action name plus a flat set of string parameters.
//! Parameters are kept in a [`ParameterSet`], which iterates in ascending byte
//! order of the key so that signing and serialization agree on ordering.

use std::collections::BTreeMap;

mod action;
mod identity;

pub use action::Action;
pub use identity::{
    is_domain, is_email_address, validate_domain, validate_email_address, validate_identity,
    FormatError, IdentityType,
};

/// Query parameters, sorted by key.
pub type ParameterSet = BTreeMap<String, String>;
