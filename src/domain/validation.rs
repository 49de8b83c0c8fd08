use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    RecipientRequired,
    MessageRequired,
    SenderRequired,
    InvalidPhoneNumber { input: String },
    InvalidUrl { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipientRequired => write!(f, "at least one valid recipient is required"),
            Self::MessageRequired => write!(f, "message text must not be empty"),
            Self::SenderRequired => write!(f, "sender must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "invalid {field} url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
