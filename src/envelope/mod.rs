//! Outbound message envelopes.
//!
//! An [`Envelope`] collects the sender, recipients, subject, bodies and
//! attachments of one message and serializes itself into the parameters of a
//! send action:
//!
//! - without attachments, into the structured `SendEmail` fields
//! - with at least one attachment, into a single base64 MIME document under
//!   `RawMessage.Data` for `SendRawEmail`
//!
//! # Example
//!
//! ```
//! use integrations_aws_ses_query::envelope::Envelope;
//! use integrations_aws_ses_query::types::Action;
//!
//! let mut envelope = Envelope::new("sender@example.com", "Hello", "Plain text body");
//! envelope
//!     .add_to(["alice@example.com", "bob@example.com"])
//!     .add_cc(["carol@example.com"]);
//!
//! let message = envelope.build()?;
//! assert_eq!(message.action(), Action::SendEmail);
//! assert_eq!(
//!     message.parameters()["Destination.ToAddresses.member.2"],
//!     "bob@example.com"
//! );
//! # Ok::<(), integrations_aws_ses_query::envelope::ValidationError>(())
//! ```

mod attachment;
mod boundary;
mod params;
mod raw;

pub use attachment::{Attachment, BASE64_LINE_LENGTH, DEFAULT_MIME_TYPE};
pub use boundary::{BoundarySource, RandomBoundary};
pub use raw::{encode_address_list, encode_header};

use crate::error::SesError;
use crate::types::{Action, ParameterSet};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Charset used for the subject and bodies unless overridden.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Reasons an envelope cannot be sent.
///
/// Checks run in declaration order and the first failure is reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No To, Cc or Bcc recipient.
    #[error("Message has no destination: add at least one To, Cc or Bcc address")]
    MissingDestination,

    /// Empty sender address.
    #[error("Message has no source address")]
    MissingSource,

    /// Empty subject.
    #[error("Message has no subject")]
    MissingSubject,

    /// Neither a text nor an HTML body.
    #[error("Message has no body: set a text or HTML body")]
    MissingBody,
}

/// One outbound email, built up through its add and set methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    source: String,
    subject: String,
    text_body: String,
    html_body: String,
    charset: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    reply_to: Vec<String>,
    return_path: Option<String>,
    attachments: Vec<Attachment>,
}

impl Envelope {
    /// Create an envelope with a sender, subject and plain-text body.
    ///
    /// The text body may be empty when an HTML body is set afterwards.
    pub fn new(
        source: impl Into<String>,
        subject: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: Vec::new(),
            return_path: None,
            attachments: Vec::new(),
        }
    }

    /// Add `To` recipients, skipping addresses already present.
    pub fn add_to<I, S>(&mut self, addresses: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.to, addresses);
        self
    }

    /// Add `Cc` recipients, skipping addresses already present.
    pub fn add_cc<I, S>(&mut self, addresses: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.cc, addresses);
        self
    }

    /// Add `Bcc` recipients, skipping addresses already present.
    pub fn add_bcc<I, S>(&mut self, addresses: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.bcc, addresses);
        self
    }

    /// Add reply-to addresses, skipping addresses already present.
    pub fn add_reply_to<I, S>(&mut self, addresses: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.reply_to, addresses);
        self
    }

    /// Set the HTML body.
    pub fn set_html_body(&mut self, html_body: impl Into<String>) -> &mut Self {
        self.html_body = html_body.into();
        self
    }

    /// Set the charset of the subject and bodies.
    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = charset.into();
        self
    }

    /// Set the address bounces are delivered to.
    ///
    /// Only sent with the structured `SendEmail` action.
    pub fn set_return_path(&mut self, return_path: impl Into<String>) -> &mut Self {
        self.return_path = Some(return_path.into());
        self
    }

    /// Attach a file.
    pub fn add_attachment(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    /// Attach in-memory content.
    ///
    /// # Examples
    ///
    /// ```
    /// use integrations_aws_ses_query::envelope::Envelope;
    /// use integrations_aws_ses_query::types::Action;
    ///
    /// let mut envelope = Envelope::new("sender@example.com", "Report", "See attached");
    /// envelope
    ///     .add_to(["alice@example.com"])
    ///     .add_attachment_from_data("report.csv", b"a,b\n".to_vec(), "text/csv", None);
    ///
    /// assert_eq!(envelope.action(), Action::SendRawEmail);
    /// ```
    pub fn add_attachment_from_data(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        content_id: Option<&str>,
    ) -> &mut Self {
        let mut attachment = Attachment::new(name, data).with_mime_type(mime_type);
        if let Some(content_id) = content_id {
            attachment = attachment.with_content_id(content_id);
        }
        self.add_attachment(attachment)
    }

    /// Attach the contents of a file, read immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Attachment`] if the file cannot be read. The
    /// envelope is left unchanged in that case.
    pub fn add_attachment_from_file(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        mime_type: impl Into<String>,
        content_id: Option<&str>,
    ) -> Result<&mut Self, SesError> {
        let path = path.as_ref();
        let mut attachment = Attachment::from_file(name, path)
            .map_err(|source| SesError::Attachment {
                path: path.to_path_buf(),
                source,
            })?
            .with_mime_type(mime_type);
        if let Some(content_id) = content_id {
            attachment = attachment.with_content_id(content_id);
        }
        Ok(self.add_attachment(attachment))
    }

    /// The send action this envelope serializes to.
    pub fn action(&self) -> Action {
        if self.attachments.is_empty() {
            Action::SendEmail
        } else {
            Action::SendRawEmail
        }
    }

    /// Check that the envelope can be sent.
    ///
    /// # Errors
    ///
    /// The first of [`ValidationError::MissingDestination`],
    /// [`ValidationError::MissingSource`], [`ValidationError::MissingSubject`]
    /// and [`ValidationError::MissingBody`] that applies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if self.source.is_empty() {
            return Err(ValidationError::MissingSource);
        }
        if self.subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.text_body.is_empty() && self.html_body.is_empty() {
            return Err(ValidationError::MissingBody);
        }
        Ok(())
    }

    /// Validate and serialize, drawing a random MIME boundary if one is needed.
    pub fn build(self) -> Result<MessageParameters, ValidationError> {
        self.build_with(&mut RandomBoundary)
    }

    /// Validate and serialize with a caller-supplied boundary source.
    ///
    /// The source is consulted once, and only for raw messages.
    pub fn build_with(
        self,
        boundaries: &mut dyn BoundarySource,
    ) -> Result<MessageParameters, ValidationError> {
        self.validate()?;

        let action = self.action();
        let parameters = match action {
            Action::SendRawEmail => {
                let boundary = boundaries.next_boundary();
                let document = raw::render_raw_message(&self, &boundary);
                params::raw_parameters(BASE64.encode(document.as_bytes()))
            }
            _ => params::simple_parameters(&self),
        };

        debug!(
            action = %action,
            to = self.to.len(),
            cc = self.cc.len(),
            bcc = self.bcc.len(),
            reply_to = self.reply_to.len(),
            attachments = self.attachments.len(),
            "serialized envelope"
        );

        Ok(MessageParameters { action, parameters })
    }

    /// Sender address.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain-text body.
    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    /// HTML body.
    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    /// Charset of the subject and bodies.
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// `To` recipients in insertion order.
    pub fn to(&self) -> &[String] {
        &self.to
    }

    /// `Cc` recipients in insertion order.
    pub fn cc(&self) -> &[String] {
        &self.cc
    }

    /// `Bcc` recipients in insertion order.
    pub fn bcc(&self) -> &[String] {
        &self.bcc
    }

    /// Reply-to addresses in insertion order.
    pub fn reply_to(&self) -> &[String] {
        &self.reply_to
    }

    /// Return path, if set.
    pub fn return_path(&self) -> Option<&str> {
        self.return_path.as_deref()
    }

    /// Attachments in insertion order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

fn extend_unique<I, S>(list: &mut Vec<String>, addresses: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for address in addresses {
        let address = address.into();
        if !list.contains(&address) {
            list.push(address);
        }
    }
}

/// A serialized envelope: the send action and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParameters {
    action: Action,
    parameters: ParameterSet,
}

impl MessageParameters {
    /// `SendEmail` or `SendRawEmail`.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The request parameters, without `Action`.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Take ownership of the parameters.
    pub fn into_parameters(self) -> ParameterSet {
        self.parameters
    }

    /// Whether this is a raw MIME message.
    pub fn is_raw(&self) -> bool {
        self.action == Action::SendRawEmail
    }

    /// The base64 MIME document, for raw messages.
    pub fn raw_message_data(&self) -> Option<&str> {
        self.parameters
            .get(params::RAW_MESSAGE_DATA)
            .map(String::as_str)
    }
}
