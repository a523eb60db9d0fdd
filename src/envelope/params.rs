//! Flattening of an envelope into `SendEmail` / `SendRawEmail` parameters.

use super::Envelope;
use crate::types::ParameterSet;

pub(crate) const RAW_MESSAGE_DATA: &str = "RawMessage.Data";

/// Parameters for the structured `SendEmail` action.
pub(crate) fn simple_parameters(envelope: &Envelope) -> ParameterSet {
    let mut params = ParameterSet::new();

    push_members(&mut params, "Destination.ToAddresses.member", &envelope.to);
    push_members(&mut params, "Destination.CcAddresses.member", &envelope.cc);
    push_members(&mut params, "Destination.BccAddresses.member", &envelope.bcc);
    push_members(&mut params, "ReplyToAddresses.member", &envelope.reply_to);

    params.insert("Source".to_string(), envelope.source.clone());

    if let Some(return_path) = envelope.return_path.as_ref().filter(|p| !p.is_empty()) {
        params.insert("ReturnPath".to_string(), return_path.clone());
    }

    params.insert("Message.Subject.Data".to_string(), envelope.subject.clone());
    params.insert("Message.Subject.Charset".to_string(), envelope.charset.clone());

    if !envelope.text_body.is_empty() {
        params.insert("Message.Body.Text.Data".to_string(), envelope.text_body.clone());
        params.insert("Message.Body.Text.Charset".to_string(), envelope.charset.clone());
    }

    if !envelope.html_body.is_empty() {
        params.insert("Message.Body.Html.Data".to_string(), envelope.html_body.clone());
        params.insert("Message.Body.Html.Charset".to_string(), envelope.charset.clone());
    }

    params
}

/// Parameters for `SendRawEmail`, carrying the already encoded document.
pub(crate) fn raw_parameters(encoded_message: String) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert(RAW_MESSAGE_DATA.to_string(), encoded_message);
    params
}

/// Insert `<prefix>.1`, `<prefix>.2`, ... in list order.
fn push_members(params: &mut ParameterSet, prefix: &str, values: &[String]) {
    for (index, value) in values.iter().enumerate() {
        params.insert(format!("{}.{}", prefix, index + 1), value.clone());
    }
}
