use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    MessageText, PartnerId, RawPhoneNumber, SendTime, SenderId, SmsId, TtlMinutes,
};

/// SMS.RU caps `sms/send` at 100 recipients per call.
pub const SEND_SMS_MAX_RECIPIENTS: usize = 100;
/// SMS.RU caps `sms/cost` at 100 recipients per call.
pub const CHECK_COST_MAX_RECIPIENTS: usize = 100;
/// SMS.RU caps `sms/status` at 100 ids per call.
pub const CHECK_STATUS_MAX_SMS_IDS: usize = 100;

#[derive(Debug, Clone, Default)]
/// Optional parameters for [`SendSms`].
///
/// Every recognized provider option is an explicit field. The tri-state flags
/// (`daytime`, `transit`, `test`) are transmitted as `1` for `Some(true)`, `0` for
/// `Some(false)`, and omitted entirely for `None`. Parameters this crate does not
/// model go into `extra` and are appended to the query verbatim.
pub struct SendOptions {
    /// Sender name (`from`); must be enabled in your SMS.RU account.
    pub from: Option<SenderId>,
    /// IP address of the end user who triggered the message (`ip`).
    pub ip: Option<IpAddr>,
    /// Scheduled delivery instant (`time`).
    pub time: Option<SendTime>,
    /// Delivery TTL in minutes (`ttl`).
    pub ttl: Option<TtlMinutes>,
    /// Deliver during recipient daytime hours only (`daytime`).
    pub daytime: Option<bool>,
    /// Route through the transit channel (`transit`).
    pub transit: Option<bool>,
    /// Simulate the send without delivering or charging (`test`).
    pub test: Option<bool>,
    /// Partner program identifier (`partner_id`).
    pub partner_id: Option<PartnerId>,
    /// Provider-specific parameters appended to the query as-is.
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
/// A validated `sms/send` request: one message text for one or more recipients.
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    msg: MessageText,
    options: SendOptions,
}

impl SendSms {
    /// Build a request for one or more recipients.
    ///
    /// Rejects an empty recipient list and lists over [`SEND_SMS_MAX_RECIPIENTS`].
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        msg: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if recipients.len() > SEND_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_SMS_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        Ok(Self {
            recipients,
            msg,
            options,
        })
    }

    /// Build a request for a single recipient.
    pub fn to_one(recipient: RawPhoneNumber, msg: MessageText, options: SendOptions) -> Self {
        Self {
            recipients: vec![recipient],
            msg,
            options,
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn msg(&self) -> &MessageText {
        &self.msg
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// A validated `sms/status` query for one or more message ids.
pub struct CheckStatus {
    sms_ids: Vec<SmsId>,
}

impl CheckStatus {
    /// Build a query for one or more ids.
    ///
    /// Rejects an empty list and lists over [`CHECK_STATUS_MAX_SMS_IDS`].
    pub fn new(sms_ids: Vec<SmsId>) -> Result<Self, ValidationError> {
        if sms_ids.is_empty() {
            return Err(ValidationError::Empty { field: SmsId::FIELD });
        }
        if sms_ids.len() > CHECK_STATUS_MAX_SMS_IDS {
            return Err(ValidationError::TooManySmsIds {
                max: CHECK_STATUS_MAX_SMS_IDS,
                actual: sms_ids.len(),
            });
        }
        Ok(Self { sms_ids })
    }

    /// Build a query for a single id.
    pub fn one(sms_id: SmsId) -> Self {
        Self {
            sms_ids: vec![sms_id],
        }
    }

    pub fn sms_ids(&self) -> &[SmsId] {
        &self.sms_ids
    }
}

#[derive(Debug, Clone, Default)]
/// Optional parameters for [`CheckCost`].
///
/// Same `transit` normalization as [`SendOptions`]; no scheduling fields, the
/// provider prices the message as if sent immediately.
pub struct CheckCostOptions {
    /// Price the transit channel route (`transit`).
    pub transit: Option<bool>,
    /// Provider-specific parameters appended to the query as-is.
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
/// A validated `sms/cost` query: the estimate needs the recipients and the text,
/// since cost depends on the destination and on how many segments the text splits into.
pub struct CheckCost {
    recipients: Vec<RawPhoneNumber>,
    msg: MessageText,
    options: CheckCostOptions,
}

impl CheckCost {
    /// Build a query for one or more recipients.
    ///
    /// Rejects an empty recipient list and lists over [`CHECK_COST_MAX_RECIPIENTS`].
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        msg: MessageText,
        options: CheckCostOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if recipients.len() > CHECK_COST_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: CHECK_COST_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        Ok(Self {
            recipients,
            msg,
            options,
        })
    }

    /// Build a query for a single recipient.
    pub fn to_one(recipient: RawPhoneNumber, msg: MessageText, options: CheckCostOptions) -> Self {
        Self {
            recipients: vec![recipient],
            msg,
            options,
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn msg(&self) -> &MessageText {
        &self.msg
    }

    pub fn options(&self) -> &CheckCostOptions {
        &self.options
    }
}
