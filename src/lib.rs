//! Typed Rust client for the TurboSMS SOAP gateway.
//!
//! The crate has three layers: a domain layer of strong types (phone numbers,
//! message text, gateway reply literals), a transport layer for the SOAP
//! envelope format, and a client layer running the send workflow.
//!
//! ```rust,no_run
//! use turbosms::{SendSms, SmsSender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), turbosms::TurboSmsError> {
//!     let mut sender = SmsSender::new("login", "password", "Shop")?;
//!     let request = SendSms::new(["+38 (050) 123-45-67"], "hello");
//!     sender.send(request).await?;
//!     println!("{:?}", sender.last_results());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AuthError, BalanceError, SendError, SmsSender, SmsSenderBuilder, TurboSmsConfig, TurboSmsError,
};
pub use domain::{
    Credits, KnownReply, Login, MessageText, Password, PhoneNumber, SendSms, SenderName,
    ValidationError, VerifiedSend, WapPushUrl, verify,
};
