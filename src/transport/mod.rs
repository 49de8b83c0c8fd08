//! Transport layer: SOAP envelope encoding and response decoding.

mod account;
mod envelope;
mod send_sms;

pub use account::{
    AUTH, GET_CREDIT_BALANCE, decode_auth_response, decode_get_credit_balance_response,
    encode_auth_envelope, encode_get_credit_balance_envelope,
};
pub use envelope::{TransportError, decode_fault, soap_action};
pub use send_sms::{SEND_SMS, decode_send_sms_response, encode_send_sms_envelope};
