use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, PhoneNumber, SenderName, WapPushUrl};

/// A message to send, as supplied by the caller.
///
/// Nothing is validated here; [`SendSms::valid_recipients`] and [`verify`]
/// turn it into a [`VerifiedSend`].
#[derive(Debug, Clone, Default)]
pub struct SendSms {
    recipients: Vec<String>,
    message: String,
    sender: Option<String>,
    wap_push: Option<WapPushUrl>,
}

impl SendSms {
    pub fn new<I, S>(recipients: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recipients: recipients.into_iter().map(Into::into).collect(),
            message: message.into(),
            sender: None,
            wap_push: None,
        }
    }

    /// Override the client's default sender label for this message.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Attach a WAP-push link.
    pub fn with_wap_push(mut self, link: WapPushUrl) -> Self {
        self.wap_push = Some(link);
        self
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn wap_push(&self) -> Option<&WapPushUrl> {
        self.wap_push.as_ref()
    }

    /// Normalized recipients that have the canonical shape, deduplicated with
    /// first-seen order kept. Anything else is dropped without an error.
    ///
    /// See [`PhoneNumber::with_country_code`] for how `country_code` applies.
    pub fn valid_recipients(&self, country_code: Option<&str>) -> Vec<PhoneNumber> {
        let mut out = Vec::<PhoneNumber>::with_capacity(self.recipients.len());
        for phone in self
            .recipients
            .iter()
            .filter_map(|raw| PhoneNumber::with_country_code(raw, country_code).ok())
        {
            if !out.contains(&phone) {
                out.push(phone);
            }
        }
        out
    }
}

/// A send that passed [`verify`] and can go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSend {
    recipients: Vec<PhoneNumber>,
    message: MessageText,
    sender: SenderName,
    wap_push: Option<WapPushUrl>,
}

impl VerifiedSend {
    pub fn recipients(&self) -> &[PhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn sender(&self) -> &SenderName {
        &self.sender
    }

    pub fn wap_push(&self) -> Option<&WapPushUrl> {
        self.wap_push.as_ref()
    }

    /// Credits needed: one per recipient.
    pub fn credits_required(&self) -> usize {
        self.recipients.len()
    }

    pub(crate) fn with_wap_push(mut self, link: Option<WapPushUrl>) -> Self {
        self.wap_push = link;
        self
    }
}

/// Check caller input in a fixed order: recipients, then message, then sender.
/// The first failing check is returned.
pub fn verify(
    recipients: Vec<PhoneNumber>,
    message: &str,
    sender: &str,
) -> Result<VerifiedSend, ValidationError> {
    if recipients.is_empty() {
        return Err(ValidationError::RecipientRequired);
    }
    let message = MessageText::new(message)?;
    let sender = SenderName::new(sender)?;

    Ok(VerifiedSend {
        recipients,
        message,
        sender,
        wap_push: None,
    })
}
