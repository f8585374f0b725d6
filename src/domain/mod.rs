//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CHECK_COST_MAX_RECIPIENTS, CHECK_STATUS_MAX_SMS_IDS, CheckCost, CheckCostOptions, CheckStatus,
    SEND_SMS_MAX_RECIPIENTS, SendOptions, SendSms,
};
pub use response::{
    CheckCostResponse, CheckStatusResponse, SendSmsResponse, SmsCostResult, SmsResult,
    SmsStatusResult, Status,
};
pub use validation::ValidationError;
pub use value::{
    ApiId, Login, MessageText, Money, PartnerId, Password, PhoneNumber, RawPhoneNumber, SendTime,
    SenderId, SmsId, TtlMinutes,
};
