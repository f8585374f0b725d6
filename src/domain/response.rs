use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::value::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Top-level and per-item success marker in every SMS.RU response.
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Decoded `sms/send` payload.
///
/// `sms` is keyed by phone number exactly as the provider returned it.
pub struct SendSmsResponse {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    /// Account balance after the send.
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub sms: BTreeMap<String, SmsResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Per-recipient outcome of a send.
pub struct SmsResult {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    /// Message id to poll with `sms/status`; absent when the recipient was rejected.
    #[serde(default)]
    pub sms_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Decoded `sms/status` payload.
///
/// `sms` is keyed by message id exactly as the provider returned it.
pub struct CheckStatusResponse {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub sms: BTreeMap<String, SmsStatusResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Per-message delivery status.
pub struct SmsStatusResult {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub cost: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Decoded `sms/cost` payload.
pub struct CheckCostResponse {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub total_cost: Option<Money>,
    /// Total number of SMS segments the message would split into.
    #[serde(default)]
    pub total_sms: Option<u32>,
    #[serde(default)]
    pub sms: BTreeMap<String, SmsCostResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Per-recipient cost estimate.
pub struct SmsCostResult {
    pub status: Status,
    pub status_code: i32,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub cost: Option<Money>,
    /// Segment count for this recipient.
    #[serde(default)]
    pub sms: Option<u32>,
}
