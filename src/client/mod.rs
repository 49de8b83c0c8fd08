//! Client layer: runs the verify → authenticate → balance → send workflow over
//! the SOAP transport and maps gateway replies to typed errors.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{
    Credits, KnownReply, Login, Password, SendOutcome, SendSms, ValidationError, verify,
};
use crate::transport::{self, TransportError};

const DEFAULT_ENDPOINT: &str = "http://turbosms.in.ua/api/soap.html";
const DEFAULT_COUNTRY_CODE: &str = "38";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait SoapTransport: Send + Sync {
    fn call<'a>(
        &'a self,
        url: &'a str,
        procedure: &'a str,
        envelope: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl SoapTransport for ReqwestTransport {
    fn call<'a>(
        &'a self,
        url: &'a str,
        procedure: &'a str,
        envelope: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
                .header("SOAPAction", transport::soap_action(procedure))
                .body(envelope)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// The gateway refused the `Auth` call.
///
/// A failed authentication leaves the sender unauthenticated; the next
/// [`SmsSender::send`] tries again.
pub enum AuthError {
    #[error("not enough parameters to authenticate")]
    NeedMoreParams,

    #[error("wrong login or password")]
    WrongCredentials,

    /// Account not activated, blocked, or disabled. Carries the gateway text.
    #[error("account unavailable: {0}")]
    AccountError(String),

    /// Any reply the client does not recognize.
    #[error("authentication failed: {0}")]
    ServiceError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("not authorised to read the credit balance")]
    Unauthorised,

    #[error("insufficient balance: {available} credits available, {required} required")]
    InsufficientBalance { available: i64, required: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// `SendSMS` returned a bare string instead of a result list.
    #[error("invalid send response: {0}")]
    InvalidResponse(String),

    /// The first result entry was not the success reply.
    #[error("send failed: {0}")]
    ServiceError(String),
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsSender`].
pub enum TurboSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a SOAP fault in the body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway answered with a SOAP fault.
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    /// Response body could not be decoded as the expected envelope.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("balance error: {0}")]
    Balance(#[from] BalanceError),

    #[error("send error: {0}")]
    Send(#[from] SendError),
}

impl From<TransportError> for TurboSmsError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Fault { code, message } => Self::Fault { code, message },
            other => Self::Parse(Box::new(other)),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
/// Account settings for [`SmsSender`], loadable from any serde format.
pub struct TurboSmsConfig {
    pub login: String,
    /// Excluded from serialization to prevent leaks.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Default sender label used when a message does not set its own.
    pub sender: String,
    /// Record a synthetic success instead of calling the gateway.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Digits prepended to national-format recipients. `None` disables it.
    #[serde(default = "default_country_code")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for TurboSmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurboSmsConfig")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("sender", &self.sender)
            .field("debug", &self.debug)
            .field("endpoint", &self.endpoint)
            .field("country_code", &self.country_code)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_country_code() -> Option<String> {
    Some(DEFAULT_COUNTRY_CODE.to_owned())
}

#[derive(Debug, Clone)]
/// Builder for [`SmsSender`].
///
/// Use this when you need debug mode or a custom endpoint, timeout, or user-agent.
pub struct SmsSenderBuilder {
    login: Login,
    password: Password,
    sender: String,
    debug: bool,
    endpoint: String,
    country_code: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsSenderBuilder {
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            login: Login::new(login),
            password: Password::new(password),
            sender: sender.into(),
            debug: false,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            country_code: Some(DEFAULT_COUNTRY_CODE.to_owned()),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn from_config(config: TurboSmsConfig) -> Self {
        let mut builder = Self::new(config.login, config.password, config.sender)
            .debug(config.debug)
            .endpoint(config.endpoint)
            .country_code(config.country_code);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
    }

    /// In debug mode [`SmsSender::send`] never touches the network.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the SOAP endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Country code digits used to complete national-format recipients
    /// (default `38`). Non-digits are ignored; `None` disables completion.
    pub fn country_code(mut self, code: Option<String>) -> Self {
        self.country_code = code
            .map(|code| code.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|code| !code.is_empty());
        self
    }

    /// Set an HTTP client timeout applied to each gateway call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsSender`].
    ///
    /// The HTTP client keeps cookies so the session opened by `Auth` is
    /// reused by later calls.
    pub fn build(self) -> Result<SmsSender, TurboSmsError> {
        url::Url::parse(&self.endpoint)
            .map_err(|_| TurboSmsError::InvalidEndpoint(self.endpoint.clone()))?;

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TurboSmsError::Transport(Box::new(err)))?;

        Ok(SmsSender {
            login: self.login,
            password: self.password,
            sender: self.sender,
            debug: self.debug,
            endpoint: self.endpoint,
            country_code: self.country_code,
            connected: false,
            last_results: Vec::new(),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

/// TurboSMS account client.
///
/// One instance per account. It authenticates lazily on the first send and
/// stays authenticated for its whole lifetime. Operations that change state
/// take `&mut self`; share an instance behind your own lock if needed.
pub struct SmsSender {
    login: Login,
    password: Password,
    sender: String,
    debug: bool,
    endpoint: String,
    country_code: Option<String>,
    connected: bool,
    last_results: Vec<String>,
    http: Arc<dyn SoapTransport>,
}

impl fmt::Debug for SmsSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsSender")
            .field("login", &self.login)
            .field("sender", &self.sender)
            .field("debug", &self.debug)
            .field("endpoint", &self.endpoint)
            .field("connected", &self.connected)
            .field("last_results", &self.last_results)
            .finish_non_exhaustive()
    }
}

impl SmsSender {
    /// Create a sender against the default endpoint.
    ///
    /// For debug mode and other settings, use [`SmsSender::builder`].
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, TurboSmsError> {
        SmsSenderBuilder::new(login, password, sender).build()
    }

    pub fn builder(
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> SmsSenderBuilder {
        SmsSenderBuilder::new(login, password, sender)
    }

    pub fn from_config(config: TurboSmsConfig) -> Result<Self, TurboSmsError> {
        SmsSenderBuilder::from_config(config).build()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Default sender label.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Results recorded by the most recent successful send; empty before the
    /// first one. A failed send leaves the previous results in place.
    pub fn last_results(&self) -> &[String] {
        &self.last_results
    }

    /// Send `request` to every valid recipient.
    ///
    /// Recipients are normalized to `+` and digits; those that do not end up
    /// as exactly 12 digits are dropped without an error. National-format
    /// numbers are first completed with the configured country code (`38`
    /// unless overridden); build with
    /// [`country_code(None)`](SmsSenderBuilder::country_code) to drop them
    /// instead. The remaining input
    /// is verified, the account is authenticated if needed, and the balance
    /// must cover one credit per recipient before `SendSMS` is called.
    ///
    /// Only the first entry of the gateway's result list decides success, so
    /// a failure reported for a later recipient is not surfaced here. Inspect
    /// [`SmsSender::last_results`] for per-recipient entries.
    ///
    /// Errors:
    /// - [`TurboSmsError::Validation`] for missing recipients, message or sender,
    /// - [`TurboSmsError::Auth`] and [`TurboSmsError::Balance`] from the
    ///   preliminary gateway calls,
    /// - [`TurboSmsError::Send`] when the send reply is not a success.
    #[instrument(skip_all, fields(recipients = request.recipients().len(), debug = self.debug))]
    pub async fn send(&mut self, request: SendSms) -> Result<(), TurboSmsError> {
        if self.debug {
            debug!("debug mode, gateway not called");
            self.last_results = vec![KnownReply::DebugSendSuccess.as_str().to_owned()];
            return Ok(());
        }

        let recipients = request.valid_recipients(self.country_code.as_deref());
        let dropped = request.recipients().len() - recipients.len();
        if dropped > 0 {
            debug!(dropped, "recipients dropped by normalization");
        }

        let sender = request.sender().unwrap_or(self.sender.as_str());
        let verified = verify(recipients, request.message(), sender)?
            .with_wap_push(request.wap_push().cloned());

        self.authenticate().await?;
        self.check_balance(verified.credits_required()).await?;

        let body = self
            .call(transport::SEND_SMS, transport::encode_send_sms_envelope(&verified))
            .await?;

        match transport::decode_send_sms_response(&body)? {
            SendOutcome::Bare(raw) => Err(SendError::InvalidResponse(raw).into()),
            SendOutcome::Results(results) => self.handle_provider_responses(results),
        }
    }

    /// Call `Auth` unless this sender is already authenticated.
    #[instrument(skip_all)]
    pub async fn authenticate(&mut self) -> Result<(), TurboSmsError> {
        if self.connected {
            debug!("already authenticated");
            return Ok(());
        }

        let body = self
            .call(
                transport::AUTH,
                transport::encode_auth_envelope(&self.login, &self.password),
            )
            .await?;
        let reply = transport::decode_auth_response(&body)?;
        classify_auth_reply(&reply)?;

        self.connected = true;
        debug!("authenticated");
        Ok(())
    }

    /// Read the account's credit balance.
    ///
    /// The gateway only answers authenticated sessions; call
    /// [`SmsSender::authenticate`] first or expect [`BalanceError::Unauthorised`].
    #[instrument(skip_all)]
    pub async fn balance(&self) -> Result<Credits, TurboSmsError> {
        let body = self
            .call(
                transport::GET_CREDIT_BALANCE,
                transport::encode_get_credit_balance_envelope(),
            )
            .await?;
        let reply = transport::decode_get_credit_balance_response(&body)?;

        if KnownReply::from_text(&reply) == Some(KnownReply::NotAuthorised) {
            return Err(BalanceError::Unauthorised.into());
        }

        let credits = Credits::parse_loose(&reply);
        debug!(credits = credits.value(), "balance read");
        Ok(credits)
    }

    /// Fail unless the balance covers `required` credits.
    pub async fn check_balance(&self, required: usize) -> Result<Credits, TurboSmsError> {
        let credits = self.balance().await?;
        if !credits.covers(required) {
            return Err(BalanceError::InsufficientBalance {
                available: credits.value(),
                required,
            }
            .into());
        }
        Ok(credits)
    }

    fn handle_provider_responses(&mut self, results: Vec<String>) -> Result<(), TurboSmsError> {
        let first = results.first().map(String::as_str).unwrap_or_default();
        if KnownReply::from_text(first) != Some(KnownReply::SendSuccess) {
            return Err(SendError::ServiceError(first.to_owned()).into());
        }

        debug!(results = results.len(), "gateway accepted the message");
        self.last_results = results;
        Ok(())
    }

    async fn call(&self, procedure: &str, envelope: String) -> Result<String, TurboSmsError> {
        let response = self
            .http
            .call(&self.endpoint, procedure, envelope)
            .await
            .map_err(TurboSmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            // SOAP servers report faults with a 500 status.
            if let Some((code, message)) = transport::decode_fault(&response.body) {
                return Err(TurboSmsError::Fault { code, message });
            }
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TurboSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn classify_auth_reply(reply: &str) -> Result<(), AuthError> {
    match KnownReply::from_text(reply) {
        Some(KnownReply::AuthNeedMoreParams) => Err(AuthError::NeedMoreParams),
        Some(KnownReply::AuthWrongCredentials) => Err(AuthError::WrongCredentials),
        Some(known) if known.is_account_error() => Err(AuthError::AccountError(reply.to_owned())),
        Some(KnownReply::AuthSuccess) => Ok(()),
        _ => Err(AuthError::ServiceError(reply.to_owned())),
    }
}
