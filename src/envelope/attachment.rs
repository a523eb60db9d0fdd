//! File attachments carried by raw messages.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;
use std::path::Path;

/// MIME type used when none is given.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Line length of the base64 body of an attachment part.
pub const BASE64_LINE_LENGTH: usize = 76;

/// A file attached to an outgoing message.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::envelope::Attachment;
///
/// let attachment = Attachment::new("report.csv", b"a,b\n1,2\n".to_vec())
///     .with_mime_type("text/csv");
///
/// assert_eq!(attachment.mime_type(), "text/csv");
/// assert!(attachment.content_id().is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    mime_type: String,
    data: Vec<u8>,
    content_id: Option<String>,
}

impl Attachment {
    /// Create an attachment with the default MIME type.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            data: data.into(),
            content_id: None,
        }
    }

    /// Read an attachment from disk.
    ///
    /// The file is read immediately, so later changes to it are not seen.
    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(name, data))
    }

    /// Set the MIME type, written verbatim into the part's `Content-Type`.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Set the MIME type from a parsed media type.
    pub fn with_mime(self, mime: &mime::Mime) -> Self {
        self.with_mime_type(mime.to_string())
    }

    /// Set the content ID used to reference the part from HTML.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Display name of the attachment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type of the attachment.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Content ID, if one was set.
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Base64 of the content in 76-character lines, each ending in `\n`.
    ///
    /// Empty content yields a single `\n`.
    pub fn encoded_body(&self) -> String {
        let encoded = BASE64.encode(&self.data);
        if encoded.is_empty() {
            return "\n".to_string();
        }

        let lines = encoded.len() / BASE64_LINE_LENGTH + 1;
        let mut output = String::with_capacity(encoded.len() + lines);
        let mut rest = encoded.as_str();
        while !rest.is_empty() {
            // base64 output is ASCII, so any byte index is a char boundary
            let (line, tail) = rest.split_at(rest.len().min(BASE64_LINE_LENGTH));
            output.push_str(line);
            output.push('\n');
            rest = tail;
        }
        output
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.data.len())
            .field("content_id", &self.content_id)
            .finish()
    }
}
