//! Raw MIME document assembly for `SendRawEmail`.
//!
//! The document uses bare `\n` line endings and always has the same shape: a
//! `multipart/mixed` body whose first part is a `multipart/alternative` with
//! the text and HTML bodies, followed by one part per attachment.

use super::Envelope;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt::Write as _;

/// Encode the display name of an address as an RFC 2047 encoded word.
///
/// `Name <user@example.com>` becomes `=?<charset>?B?<base64("Name ")>?= <user@example.com>`.
/// The display part is encoded exactly as written, trailing space included.
/// Addresses without a display name are returned unchanged.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::envelope::encode_header;
///
/// assert_eq!(
///     encode_header("Jöhn Doe <john@x.com>", "UTF-8"),
///     "=?UTF-8?B?SsO2aG4gRG9lIA==?= <john@x.com>"
/// );
/// assert_eq!(encode_header("john@x.com", "UTF-8"), "john@x.com");
/// ```
pub fn encode_header(address: &str, charset: &str) -> String {
    match split_display_name(address) {
        Some((display, email)) => format!(
            "=?{}?B?{}?= <{}>",
            charset,
            BASE64.encode(display.as_bytes()),
            email
        ),
        None => address.to_string(),
    }
}

/// Encode each address and join them with `", "`.
pub fn encode_address_list<S: AsRef<str>>(addresses: &[S], charset: &str) -> String {
    addresses
        .iter()
        .map(|address| encode_header(address.as_ref(), charset))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split `display <email>` at the last bracket pair.
///
/// Text after the closing bracket is discarded. An empty display part counts
/// as no display name.
fn split_display_name(address: &str) -> Option<(&str, &str)> {
    let close = address.rfind('>')?;
    let open = address[..close].rfind('<')?;
    let display = &address[..open];

    if display.is_empty() {
        return None;
    }
    Some((display, &address[open + 1..close]))
}

/// Render the complete raw document for an envelope.
pub(crate) fn render_raw_message(envelope: &Envelope, boundary: &str) -> String {
    let charset = envelope.charset.as_str();
    let mut raw = String::new();

    // Writing into a String never fails.
    let _ = writeln!(raw, "From: {}", encode_header(&envelope.source, charset));
    if !envelope.to.is_empty() {
        let _ = writeln!(raw, "To: {}", encode_address_list(envelope.to.as_slice(), charset));
    }
    if !envelope.cc.is_empty() {
        let _ = writeln!(raw, "cc: {}", encode_address_list(envelope.cc.as_slice(), charset));
    }
    if !envelope.bcc.is_empty() {
        // Repeats the cc list. Bcc addresses never appear in the document.
        let _ = writeln!(raw, "Bcc: {}", encode_address_list(envelope.cc.as_slice(), charset));
    }
    if !envelope.reply_to.is_empty() {
        let _ = writeln!(raw, "Reply-To: {}", encode_address_list(envelope.reply_to.as_slice(), charset));
    }

    let _ = writeln!(
        raw,
        "Subject: =?{}?B?{}?=",
        charset,
        BASE64.encode(envelope.subject.as_bytes())
    );
    raw.push_str("MIME-Version: 1.0\n");
    let _ = writeln!(raw, "Content-Type: multipart/mixed; boundary=\"{}\"", boundary);
    let _ = write!(raw, "\n--{}\n", boundary);
    let _ = writeln!(
        raw,
        "Content-Type: multipart/alternative; boundary=\"alt-{}\"",
        boundary
    );

    if !envelope.text_body.is_empty() {
        let _ = write!(raw, "\n--alt-{}\n", boundary);
        let _ = write!(raw, "Content-Type: text/plain; charset=\"{}\"\n\n", charset);
        raw.push_str(&envelope.text_body);
        raw.push('\n');
    }

    if !envelope.html_body.is_empty() {
        let _ = write!(raw, "\n--alt-{}\n", boundary);
        let _ = write!(raw, "Content-Type: text/html; charset=\"{}\"\n\n", charset);
        raw.push_str(&envelope.html_body);
        raw.push('\n');
    }
    let _ = write!(raw, "\n--alt-{}--\n", boundary);

    for attachment in &envelope.attachments {
        let _ = write!(raw, "\n--{}\n", boundary);
        let _ = writeln!(
            raw,
            "Content-Type: {}; name=\"{}\"",
            attachment.mime_type(),
            attachment.name()
        );
        if let Some(content_id) = attachment.content_id() {
            let _ = writeln!(raw, "Content-ID{}", content_id);
        }
        raw.push_str("Content-Transfer-Encoding: base64\n");
        raw.push('\n');
        raw.push_str(&attachment.encoded_body());
        raw.push('\n');
    }

    let _ = write!(raw, "\n--{}--\n", boundary);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Attachment;

    const BOUNDARY: &str = "0123456789abcdef0123456789abcdef";

    fn envelope() -> Envelope {
        let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
        envelope.add_to(["a@x.com"]);
        envelope.add_attachment(Attachment::new("a.txt", b"hello".to_vec()).with_mime_type("text/plain"));
        envelope
    }

    #[test]
    fn test_encode_header_display_name() {
        assert_eq!(
            encode_header("Jöhn Doe <john@x.com>", "UTF-8"),
            format!("=?UTF-8?B?{}?= <john@x.com>", BASE64.encode("Jöhn Doe "))
        );
    }

    #[test]
    fn test_encode_header_uses_charset() {
        assert_eq!(
            encode_header("Bob <bob@x.com>", "ISO-8859-1"),
            "=?ISO-8859-1?B?Qm9iIA==?= <bob@x.com>"
        );
    }

    #[test]
    fn test_encode_header_plain_and_bare_brackets() {
        assert_eq!(encode_header("bob@x.com", "UTF-8"), "bob@x.com");
        assert_eq!(encode_header("<bob@x.com>", "UTF-8"), "<bob@x.com>");
    }

    #[test]
    fn test_encode_header_uses_last_bracket_pair() {
        assert_eq!(
            encode_header("A <b> C <c@x.com>", "UTF-8"),
            format!("=?UTF-8?B?{}?= <c@x.com>", BASE64.encode("A <b> C "))
        );
    }

    #[test]
    fn test_encode_address_list_joins() {
        let list = ["a@x.com", "Bob <b@x.com>"];
        assert_eq!(
            encode_address_list(&list[..], "UTF-8"),
            "a@x.com, =?UTF-8?B?Qm9iIA==?= <b@x.com>"
        );
    }

    #[test]
    fn test_render_exact_layout() {
        let raw = render_raw_message(&envelope(), BOUNDARY);

        let expected = format!(
            "From: sender@x.com\n\
             To: a@x.com\n\
             Subject: =?UTF-8?B?SGk=?=\n\
             MIME-Version: 1.0\n\
             Content-Type: multipart/mixed; boundary=\"{b}\"\n\
             \n--{b}\n\
             Content-Type: multipart/alternative; boundary=\"alt-{b}\"\n\
             \n--alt-{b}\n\
             Content-Type: text/plain; charset=\"UTF-8\"\n\n\
             Body\n\
             \n--alt-{b}--\n\
             \n--{b}\n\
             Content-Type: text/plain; name=\"a.txt\"\n\
             Content-Transfer-Encoding: base64\n\
             \naGVsbG8=\n\n\
             \n--{b}--\n",
            b = BOUNDARY
        );
        assert_eq!(raw, expected);
    }

    #[test]
    fn test_render_html_section() {
        let mut envelope = envelope();
        envelope.set_html_body("<p>Body</p>");
        let raw = render_raw_message(&envelope, BOUNDARY);

        assert!(raw.contains(&format!(
            "\n--alt-{b}\nContent-Type: text/plain; charset=\"UTF-8\"\n\nBody\n\
             \n--alt-{b}\nContent-Type: text/html; charset=\"UTF-8\"\n\n<p>Body</p>\n\
             \n--alt-{b}--\n",
            b = BOUNDARY
        )));
    }

    #[test]
    fn test_render_omits_empty_text_section() {
        let mut envelope = Envelope::new("sender@x.com", "Hi", "");
        envelope.set_html_body("<p>Only</p>");
        envelope.add_to(["a@x.com"]);
        let raw = render_raw_message(&envelope, BOUNDARY);

        assert!(!raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_render_bcc_line_carries_cc_list() {
        let mut envelope = envelope();
        envelope.add_cc(["c@x.com"]);
        envelope.add_bcc(["hidden@x.com"]);
        let raw = render_raw_message(&envelope, BOUNDARY);

        assert!(raw.contains("cc: c@x.com\n"));
        assert!(raw.contains("Bcc: c@x.com\n"));
        assert!(!raw.contains("hidden@x.com"));
    }

    #[test]
    fn test_render_header_order() {
        let mut envelope = envelope();
        envelope.add_cc(["c@x.com"]);
        envelope.add_bcc(["d@x.com"]);
        envelope.add_reply_to(["r@x.com"]);
        let raw = render_raw_message(&envelope, BOUNDARY);

        let position = |needle: &str| raw.find(needle).unwrap();
        assert!(position("From: ") < position("To: "));
        assert!(position("To: ") < position("cc: "));
        assert!(position("cc: ") < position("Bcc: "));
        assert!(position("Bcc: ") < position("Reply-To: r@x.com\n"));
        assert!(position("Reply-To: ") < position("Subject: "));
    }

    #[test]
    fn test_render_content_id_literal() {
        let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
        envelope.add_to(["a@x.com"]);
        envelope.add_attachment(Attachment::new("logo.png", vec![1u8, 2, 3]).with_content_id("<logo>"));
        let raw = render_raw_message(&envelope, BOUNDARY);

        assert!(raw.contains(
            "Content-Type: application/octet-stream; name=\"logo.png\"\n\
             Content-ID<logo>\n\
             Content-Transfer-Encoding: base64\n"
        ));
    }

    #[test]
    fn test_render_attachments_in_order() {
        let mut envelope = envelope();
        envelope.add_attachment(Attachment::new("b.txt", b"b".to_vec()));
        let raw = render_raw_message(&envelope, BOUNDARY);

        assert!(raw.find("name=\"a.txt\"").unwrap() < raw.find("name=\"b.txt\"").unwrap());
        assert_eq!(raw.matches(&format!("\n--{}\n", BOUNDARY)).count(), 3);
        assert!(raw.ends_with(&format!("\n--{}--\n", BOUNDARY)));
    }
}
