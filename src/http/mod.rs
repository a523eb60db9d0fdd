//! Transport-ready request values.
//!
//! The crate never opens a connection. A [`SignedRequest`] carries everything
//! an HTTP client needs to send one query API call:
//!
//! ```text
//! ┌─────────────────┐
//! │   SesClient     │  - Parameters from envelope or identity call
//! └────────┬────────┘
//!          │  sign
//!          ▼
//! ┌─────────────────┐
//! │  SignedRequest  │  - Method, URL with canonical query, headers
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ caller's client │  - Sends it, parses the XML response
//! └─────────────────┘
//! ```

mod request;

pub use request::{SignedRequest, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
