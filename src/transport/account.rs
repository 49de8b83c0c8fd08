use super::envelope::{TransportError, decode_text_result, encode_envelope};
use crate::domain::{Login, Password};

pub const AUTH: &str = "Auth";
pub const GET_CREDIT_BALANCE: &str = "GetCreditBalance";

pub fn encode_auth_envelope(login: &Login, password: &Password) -> String {
    encode_envelope(
        AUTH,
        &[
            (Login::FIELD, login.as_str()),
            (Password::FIELD, password.as_str()),
        ],
    )
}

pub fn decode_auth_response(xml: &str) -> Result<String, TransportError> {
    decode_text_result(xml, AUTH)
}

pub fn encode_get_credit_balance_envelope() -> String {
    encode_envelope(GET_CREDIT_BALANCE, &[])
}

pub fn decode_get_credit_balance_response(xml: &str) -> Result<String, TransportError> {
    decode_text_result(xml, GET_CREDIT_BALANCE)
}
