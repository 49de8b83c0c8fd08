use super::envelope::{SoapValue, TransportError, decode_result, encode_envelope};
use crate::domain::{MessageText, PhoneNumber, SendOutcome, SenderName, VerifiedSend, WapPushUrl};

pub const SEND_SMS: &str = "SendSMS";

pub fn encode_send_sms_envelope(request: &VerifiedSend) -> String {
    let destination = request
        .recipients()
        .iter()
        .map(PhoneNumber::as_str)
        .collect::<Vec<_>>()
        .join(",");

    let mut params = vec![
        (SenderName::FIELD, request.sender().as_str()),
        (PhoneNumber::FIELD, destination.as_str()),
        (MessageText::FIELD, request.message().as_str()),
    ];
    if let Some(link) = request.wap_push() {
        params.push((WapPushUrl::FIELD, link.as_str()));
    }

    encode_envelope(SEND_SMS, &params)
}

pub fn decode_send_sms_response(xml: &str) -> Result<SendOutcome, TransportError> {
    Ok(match decode_result(xml, SEND_SMS)? {
        SoapValue::List(items) => SendOutcome::Results(items),
        SoapValue::Text(text) => SendOutcome::Bare(text),
    })
}
