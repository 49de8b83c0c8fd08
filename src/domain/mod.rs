//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendSms, VerifiedSend, verify};
pub use response::{KnownReply, SendOutcome};
pub use validation::ValidationError;
pub use value::{Credits, Login, MessageText, Password, PhoneNumber, SenderName, WapPushUrl};

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(raw: &[&str]) -> Vec<PhoneNumber> {
        raw.iter().map(|it| PhoneNumber::new(it).unwrap()).collect()
    }

    #[test]
    fn verify_reports_missing_recipients_first() {
        assert_eq!(
            verify(Vec::new(), "hi", "Shop"),
            Err(ValidationError::RecipientRequired)
        );
        assert_eq!(
            verify(Vec::new(), "", ""),
            Err(ValidationError::RecipientRequired)
        );
    }

    #[test]
    fn verify_checks_message_before_sender() {
        let recipients = phones(&["+380501234567"]);
        assert_eq!(
            verify(recipients.clone(), "  ", ""),
            Err(ValidationError::MessageRequired)
        );
        assert_eq!(
            verify(recipients, "hi", " \t "),
            Err(ValidationError::SenderRequired)
        );
    }

    #[test]
    fn verify_trims_and_counts_credits() {
        let verified = verify(
            phones(&["+380501234567", "+380671112233"]),
            "  hello ",
            " Shop ",
        )
        .unwrap();
        assert_eq!(verified.message().as_str(), "hello");
        assert_eq!(verified.sender().as_str(), "Shop");
        assert_eq!(verified.credits_required(), 2);
        assert_eq!(verified.wap_push(), None);
    }

    #[test]
    fn valid_recipients_drops_malformed_numbers_silently() {
        let request = SendSms::new(
            ["+38 (050) 123-45-67", "0501234567", "garbage", "+380671112233"],
            "hi",
        );
        let recipients = request.valid_recipients(None);
        assert_eq!(recipients, phones(&["+380501234567", "+380671112233"]));

        let recipients = request.valid_recipients(Some("38"));
        assert_eq!(recipients, phones(&["+380501234567", "+380671112233"]));

        let recipients = request.valid_recipients(Some("ab"));
        assert_eq!(recipients, phones(&["+380501234567", "+380671112233"]));
        assert!(recipients.iter().all(|p| p.as_str()[1..].bytes().all(|b| b.is_ascii_digit())));
    }

    #[test]
    fn valid_recipients_collapses_duplicates_in_first_seen_order() {
        let request = SendSms::new(
            ["380671112233", "+380501234567", "+38 067 111 22 33"],
            "hi",
        );
        assert_eq!(
            request.valid_recipients(None),
            phones(&["+380671112233", "+380501234567"])
        );
    }

    #[test]
    fn send_sms_builder_keeps_overrides() {
        let link = WapPushUrl::new("https://example.com").unwrap();
        let request = SendSms::new(["+380501234567"], "hi")
            .with_sender("Shop")
            .with_wap_push(link.clone());
        assert_eq!(request.sender(), Some("Shop"));
        assert_eq!(request.wap_push(), Some(&link));
        assert_eq!(request.message(), "hi");
        assert_eq!(request.recipients(), ["+380501234567".to_owned()]);
    }
}
