use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// TurboSMS account login (`login`).
///
/// Not validated locally: the gateway answers an empty login with its own
/// "not enough parameters" reply, which surfaces as a typed auth error.
pub struct Login(String);

impl Login {
    /// SOAP parameter name used by `Auth`.
    pub const FIELD: &'static str = "login";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// TurboSMS account password (`password`).
///
/// `Debug` output is redacted.
pub struct Password(String);

impl Password {
    /// SOAP parameter name used by `Auth`.
    pub const FIELD: &'static str = "password";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender label shown as the message originator (`sender`).
///
/// Invariant: non-empty after trimming; stored trimmed.
pub struct SenderName(String);

impl SenderName {
    /// SOAP parameter name used by `SendSMS`.
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::SenderRequired);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming; stored trimmed.
pub struct MessageText(String);

impl MessageText {
    /// SOAP parameter name used by `SendSMS`.
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MessageRequired);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number in the gateway's canonical form: `+` and exactly
/// 12 digits (e.g. `+380501234567`).
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// SOAP parameter name used by `SendSMS` (comma-joined list).
    pub const FIELD: &'static str = "destination";

    /// Number of digits following the `+`.
    pub const DIGITS: usize = 12;

    /// Normalize `input` and validate the canonical shape.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::with_country_code(input, None)
    }

    /// Like [`PhoneNumber::new`], but a number that is exactly
    /// `country_code` digits short of the canonical length gets the code
    /// prepended first, so `050 123 45 67` with `38` becomes `+380501234567`.
    /// A code containing anything but ASCII digits is ignored.
    pub fn with_country_code(
        input: impl AsRef<str>,
        country_code: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let input = input.as_ref();
        let mut normalized = Self::normalize(input);

        let country_code = country_code.filter(|code| code.bytes().all(|b| b.is_ascii_digit()));
        if let Some(code) = country_code {
            let digits = normalized.len() - 1;
            if digits > 0 && digits + code.len() == Self::DIGITS {
                normalized.insert_str(1, code);
            }
        }

        if normalized.len() != Self::DIGITS + 1 {
            return Err(ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            });
        }
        Ok(Self(normalized))
    }

    /// Strip everything but ASCII digits and prefix the result with `+`.
    ///
    /// No length check is performed; use [`PhoneNumber::new`] for that.
    pub fn normalize(input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 1);
        out.push('+');
        out.extend(input.chars().filter(char::is_ascii_digit));
        out
    }

    /// Canonical `+DDDDDDDDDDDD` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Optional WAP-push link attached to a message (`wappush`).
pub struct WapPushUrl(url::Url);

impl WapPushUrl {
    /// SOAP parameter name used by `SendSMS`.
    pub const FIELD: &'static str = "wappush";

    /// Parse and validate an absolute URL.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim();
        url::Url::parse(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidUrl {
                field: Self::FIELD,
                input: value.to_owned(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Whole send credits available on the account.
pub struct Credits(i64);

impl Credits {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Read a balance reply the way the gateway's own clients do: an optional
    /// sign followed by leading digits is the value, anything after it is
    /// ignored, and a reply with no leading number counts as zero.
    ///
    /// `"10.75"` is 10 credits, `"12abc"` is 12, `"n/a"` is 0.
    pub fn parse_loose(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let value = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0_i64, |acc, b| {
                acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
            });

        Self(if negative { -value } else { value })
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Whether this balance covers `required` credits.
    pub fn covers(self, required: usize) -> bool {
        let required = i64::try_from(required).unwrap_or(i64::MAX);
        self.0 >= required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let sender = SenderName::new(" Shop ").unwrap();
        assert_eq!(sender.as_str(), "Shop");
        assert_eq!(SenderName::new("   "), Err(ValidationError::SenderRequired));

        let msg = MessageText::new("\n hi \t").unwrap();
        assert_eq!(msg.as_str(), "hi");
        assert_eq!(MessageText::new(""), Err(ValidationError::MessageRequired));

        let login = Login::new("");
        assert_eq!(login.as_str(), "");
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2");
        assert_eq!(password.as_str(), "hunter2");
        assert!(!format!("{password:?}").contains("hunter2"));
    }

    #[test]
    fn phone_number_strips_formatting() {
        let phone = PhoneNumber::new("+38 (050) 123-45-67").unwrap();
        assert_eq!(phone.as_str(), "+380501234567");

        let phone = PhoneNumber::new("380501234567").unwrap();
        assert_eq!(phone.as_str(), "+380501234567");
    }

    #[test]
    fn phone_number_requires_exactly_twelve_digits() {
        assert!(PhoneNumber::new("0501234567").is_err());
        assert!(PhoneNumber::new("+3805012345678").is_err());
        assert!(PhoneNumber::new("").is_err());
        assert!(matches!(
            PhoneNumber::new("abc"),
            Err(ValidationError::InvalidPhoneNumber { input }) if input == "abc"
        ));
    }

    #[test]
    fn country_code_completes_national_numbers_only() {
        let phone = PhoneNumber::with_country_code("050 123-45-67", Some("38")).unwrap();
        assert_eq!(phone.as_str(), "+380501234567");

        let phone = PhoneNumber::with_country_code("+380501234567", Some("38")).unwrap();
        assert_eq!(phone.as_str(), "+380501234567");

        assert!(PhoneNumber::with_country_code("12345", Some("38")).is_err());
        assert!(PhoneNumber::with_country_code("", Some("380501234567")).is_err());
        assert!(PhoneNumber::with_country_code("0501234567", None).is_err());
    }

    #[test]
    fn country_code_with_non_digits_is_ignored() {
        assert!(matches!(
            PhoneNumber::with_country_code("0501234567", Some("ab")),
            Err(ValidationError::InvalidPhoneNumber { input }) if input == "0501234567"
        ));
        assert!(PhoneNumber::with_country_code("0501234567", Some("+3")).is_err());

        let phone = PhoneNumber::with_country_code("+380501234567", Some("ab")).unwrap();
        assert_eq!(phone.as_str(), "+380501234567");
    }

    #[test]
    fn normalize_never_checks_length() {
        assert_eq!(PhoneNumber::normalize("050 123"), "+050123");
        assert_eq!(PhoneNumber::normalize("no digits"), "+");
    }

    #[test]
    fn wap_push_url_requires_absolute_url() {
        let link = WapPushUrl::new(" https://example.com/promo ").unwrap();
        assert_eq!(link.as_str(), "https://example.com/promo");
        assert!(WapPushUrl::new("example.com").is_err());
    }

    #[test]
    fn credits_parse_loosely() {
        assert_eq!(Credits::parse_loose("10").value(), 10);
        assert_eq!(Credits::parse_loose(" 10.75").value(), 10);
        assert_eq!(Credits::parse_loose("12abc").value(), 12);
        assert_eq!(Credits::parse_loose("-3").value(), -3);
        assert_eq!(Credits::parse_loose("n/a").value(), 0);
        assert_eq!(Credits::parse_loose("").value(), 0);
    }

    #[test]
    fn credits_cover_required_amount() {
        assert!(Credits::new(5).covers(5));
        assert!(!Credits::new(3).covers(5));
        assert!(Credits::new(0).covers(0));
        assert!(!Credits::new(-1).covers(0));
    }
}
