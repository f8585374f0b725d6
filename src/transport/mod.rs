//! Transport layer: wire-format details (endpoint paths and query-string encoding).

mod check_cost;
mod check_status;
mod send_sms;

pub use check_cost::{CHECK_COST_PATH, encode_check_cost_query};
pub use check_status::{CHECK_STATUS_PATH, encode_check_status_query};
pub use send_sms::{SEND_SMS_PATH, encode_send_sms_query};
