/// Reply texts the TurboSMS gateway is known to return.
///
/// The gateway reports outcomes as localized sentences rather than codes, so
/// matching is byte-for-byte against these literals. Unknown replies are kept
/// as raw strings by the callers of [`KnownReply::from_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KnownReply {
    AuthSuccess,
    AuthNeedMoreParams,
    AuthWrongCredentials,
    AuthAccountNotActivated,
    AuthAccountBlocked,
    AuthAccountDisabled,
    NotAuthorised,
    SendSuccess,
    /// Synthetic result recorded in debug mode; never sent by the gateway.
    DebugSendSuccess,
}

impl KnownReply {
    pub const ALL: [Self; 9] = [
        Self::AuthSuccess,
        Self::AuthNeedMoreParams,
        Self::AuthWrongCredentials,
        Self::AuthAccountNotActivated,
        Self::AuthAccountBlocked,
        Self::AuthAccountDisabled,
        Self::NotAuthorised,
        Self::SendSuccess,
        Self::DebugSendSuccess,
    ];

    /// The exact reply text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthSuccess => "Вы успешно авторизировались",
            Self::AuthNeedMoreParams => "Не достаточно параметров для выполнения функции",
            Self::AuthWrongCredentials => "Неверный логин или пароль",
            Self::AuthAccountNotActivated => {
                "Ваша учетная запись не активирована, свяжитесь с администрацией"
            }
            Self::AuthAccountBlocked => {
                "Ваша учетная запись заблокирована за нарушения, свяжитесь с администрацией"
            }
            Self::AuthAccountDisabled => "Ваша учетная запись отключена",
            Self::NotAuthorised => "Вы не авторизированы",
            Self::SendSuccess => "Сообщения успешно отправлены",
            Self::DebugSendSuccess => "Сообщения успешно отправлены (режим отладки)",
        }
    }

    /// Map a reply text to a known variant, if it matches one exactly.
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.as_str() == text)
    }

    /// Whether this reply means the account itself cannot be used.
    pub fn is_account_error(self) -> bool {
        matches!(
            self,
            Self::AuthAccountNotActivated | Self::AuthAccountBlocked | Self::AuthAccountDisabled
        )
    }
}

/// Decoded `SendSMS` result payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// `ResultArray` entries in gateway order. The first entry is the overall
    /// status; the rest are per-message ids or per-recipient statuses.
    Results(Vec<String>),
    /// A bare string where a list was expected.
    Bare(String),
}
