//! Rust client for the SMS.RU HTTP API.
//!
//! The crate is a thin, typed translation layer over the provider's flat
//! query-string API: a domain layer of strong types, a transport layer for
//! wire-format encoding, and a small client layer that issues one GET per
//! operation and applies the provider's uniform `status == "OK"` success check.
//!
//! ```rust,no_run
//! use sms_ru::{Auth, MessageText, RawPhoneNumber, SendOptions, SendSms, SmsRuClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sms_ru::SmsRuError> {
//!     let client = SmsRuClient::new(Auth::api_id("...")?);
//!     let phone = RawPhoneNumber::new("+79251234567")?;
//!     let msg = MessageText::new("hello")?;
//!     let request = SendSms::to_one(phone, msg, SendOptions::default());
//!     let response = client.send_sms(request).await?;
//!     println!("balance: {:?}", response.balance);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, SmsRuClient, SmsRuClientBuilder, SmsRuError};
pub use domain::{
    ApiId, CheckCost, CheckCostOptions, CheckCostResponse, CheckStatus, CheckStatusResponse,
    Login, MessageText, Money, PartnerId, Password, PhoneNumber, RawPhoneNumber, SendOptions,
    SendSms, SendSmsResponse, SendTime, SenderId, SmsCostResult, SmsId, SmsResult,
    SmsStatusResult, Status, TtlMinutes, ValidationError,
};
