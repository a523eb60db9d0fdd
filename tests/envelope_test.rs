//! Integration tests for envelope serialization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use integrations_aws_ses_query::envelope::{
    Attachment, BoundarySource, Envelope, MessageParameters, ValidationError,
};
use integrations_aws_ses_query::error::SesError;
use integrations_aws_ses_query::types::Action;
use proptest::prelude::*;
use std::io::Write;

struct FixedBoundary;

impl BoundarySource for FixedBoundary {
    fn next_boundary(&mut self) -> String {
        "B".to_string()
    }
}

fn raw_document(message: &MessageParameters) -> String {
    let data = message.raw_message_data().expect("raw message data");
    String::from_utf8(BASE64.decode(data).unwrap()).unwrap()
}

#[test]
fn test_simple_envelope_parameters() {
    let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
    envelope
        .add_to(["a@x.com", "b@x.com", "a@x.com"])
        .add_cc(["c@x.com"])
        .add_bcc(["d@x.com"])
        .add_reply_to(["r@x.com"])
        .set_return_path("bounce@x.com")
        .set_html_body("<p>Body</p>");

    let message = envelope.build().unwrap();
    let params = message.parameters();

    assert_eq!(message.action(), Action::SendEmail);
    assert!(!message.is_raw());
    assert_eq!(params["Destination.ToAddresses.member.1"], "a@x.com");
    assert_eq!(params["Destination.ToAddresses.member.2"], "b@x.com");
    assert!(!params.contains_key("Destination.ToAddresses.member.3"));
    assert_eq!(params["Destination.CcAddresses.member.1"], "c@x.com");
    assert_eq!(params["Destination.BccAddresses.member.1"], "d@x.com");
    assert_eq!(params["ReplyToAddresses.member.1"], "r@x.com");
    assert_eq!(params["ReturnPath"], "bounce@x.com");
    assert_eq!(params["Message.Body.Html.Data"], "<p>Body</p>");
    assert_eq!(params["Message.Body.Html.Charset"], "UTF-8");
    assert!(!params.contains_key("Action"));
}

#[test]
fn test_validation_reports_first_failure() {
    let envelope = Envelope::new("", "", "");
    assert_eq!(envelope.validate(), Err(ValidationError::MissingDestination));

    let mut envelope = Envelope::new("", "", "");
    envelope.add_bcc(["hidden@x.com"]);
    assert_eq!(envelope.validate(), Err(ValidationError::MissingSource));

    let mut envelope = Envelope::new("sender@x.com", "", "");
    envelope.add_cc(["c@x.com"]);
    assert_eq!(envelope.validate(), Err(ValidationError::MissingSubject));

    let mut envelope = Envelope::new("sender@x.com", "Hi", "");
    envelope.add_to(["a@x.com"]);
    assert_eq!(envelope.validate(), Err(ValidationError::MissingBody));

    envelope.set_html_body("<b>hi</b>");
    assert!(envelope.validate().is_ok());
}

#[test]
fn test_raw_envelope_round_trip() {
    let mut envelope = Envelope::new("Jöhn Doe <john@x.com>", "Report", "See attached");
    envelope
        .add_to(["Alice <alice@x.com>", "bob@x.com"])
        .add_cc(["carol@x.com"])
        .add_bcc(["secret@x.com"])
        .add_attachment_from_data("report.csv", b"a,b\n1,2\n".to_vec(), "text/csv", Some("<rep>"));

    let message = envelope.build_with(&mut FixedBoundary).unwrap();
    assert_eq!(message.action(), Action::SendRawEmail);
    assert_eq!(message.parameters().len(), 1);

    let document = raw_document(&message);
    assert!(document.starts_with("From: =?UTF-8?B?SsO2aG4gRG9lIA==?= <john@x.com>\n"));
    assert!(document.contains("To: =?UTF-8?B?QWxpY2Ug?= <alice@x.com>, bob@x.com\n"));
    assert!(document.contains("cc: carol@x.com\n"));
    assert!(document.contains("Bcc: carol@x.com\n"));
    assert!(!document.contains("secret@x.com"));
    assert!(document.contains("Content-Type: multipart/mixed; boundary=\"B\"\n"));
    assert!(document.contains("Content-Type: text/csv; name=\"report.csv\"\n"));
    assert!(document.contains("Content-ID<rep>\n"));
    assert!(document.contains(&format!("\n\n{}\n", BASE64.encode(b"a,b\n1,2\n"))));
    assert!(document.ends_with("\n--B--\n"));
}

#[test]
fn test_raw_envelope_drops_return_path() {
    let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
    envelope
        .add_to(["a@x.com"])
        .set_return_path("bounce@x.com")
        .add_attachment(Attachment::new("a.bin", vec![0u8, 1, 2]));

    let message = envelope.build_with(&mut FixedBoundary).unwrap();

    assert!(!message.parameters().contains_key("ReturnPath"));
    assert!(!raw_document(&message).contains("bounce@x.com"));
}

#[test]
fn test_attachment_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"%PDF-1.4 test").unwrap();

    let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
    envelope.add_to(["a@x.com"]);
    envelope
        .add_attachment_from_file("doc.pdf", file.path(), "application/pdf", None)
        .unwrap();

    assert_eq!(envelope.attachments().len(), 1);
    assert_eq!(envelope.attachments()[0].data(), b"%PDF-1.4 test");

    let document = raw_document(&envelope.build_with(&mut FixedBoundary).unwrap());
    assert!(document.contains("Content-Type: application/pdf; name=\"doc.pdf\"\n"));
    assert!(!document.contains("Content-ID"));
}

#[test]
fn test_attachment_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");

    let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
    let result = envelope.add_attachment_from_file("missing.pdf", &missing, "application/pdf", None);

    match result {
        Err(SesError::Attachment { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected attachment error, got {:?}", other.map(|_| ())),
    }
    assert!(envelope.attachments().is_empty());
    assert_eq!(envelope.action(), Action::SendEmail);
}

#[test]
fn test_custom_charset() {
    let mut envelope = Envelope::new("Zoë <zoe@x.com>", "Grüße", "Hallo");
    envelope.add_to(["a@x.com"]).set_charset("ISO-8859-1");

    let message = envelope.clone().build().unwrap();
    assert_eq!(message.parameters()["Message.Subject.Charset"], "ISO-8859-1");
    assert_eq!(message.parameters()["Message.Body.Text.Charset"], "ISO-8859-1");

    envelope.add_attachment(Attachment::new("a.txt", b"x".to_vec()));
    let document = raw_document(&envelope.build_with(&mut FixedBoundary).unwrap());
    assert!(document.contains("From: =?ISO-8859-1?B?"));
    assert!(document.contains("Content-Type: text/plain; charset=\"ISO-8859-1\"\n"));
}

fn first_occurrences(addresses: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for address in addresses {
        if !unique.contains(address) {
            unique.push(address.clone());
        }
    }
    unique
}

proptest! {
    #[test]
    fn prop_recipient_lists_keep_first_occurrence(
        batches in prop::collection::vec(
            prop::collection::vec("[a-d]@x\\.com", 0..6),
            1..4,
        ),
    ) {
        let mut envelope = Envelope::new("sender@x.com", "Hi", "Body");
        for batch in &batches {
            envelope
                .add_to(batch.iter().cloned())
                .add_cc(batch.iter().cloned())
                .add_bcc(batch.iter().cloned())
                .add_reply_to(batch.iter().cloned());
        }

        let all: Vec<String> = batches.concat();
        let expected = first_occurrences(&all);
        prop_assert_eq!(envelope.to(), expected.as_slice());
        prop_assert_eq!(envelope.cc(), expected.as_slice());
        prop_assert_eq!(envelope.bcc(), expected.as_slice());
        prop_assert_eq!(envelope.reply_to(), expected.as_slice());

        if !expected.is_empty() {
            let message = envelope.build().unwrap();
            for (index, address) in expected.iter().enumerate() {
                let key = format!("Destination.ToAddresses.member.{}", index + 1);
                prop_assert_eq!(&message.parameters()[&key], address);
            }
            let past_end = format!("Destination.ToAddresses.member.{}", expected.len() + 1);
            prop_assert!(!message.parameters().contains_key(&past_end));
        }
    }
}
