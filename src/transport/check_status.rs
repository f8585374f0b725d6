use crate::domain::{CheckStatus, SmsId};

/// Relative path of the status endpoint.
pub const CHECK_STATUS_PATH: &str = "sms/status";

/// Encode a [`CheckStatus`] query: ids join with `,` in original order.
pub fn encode_check_status_query(request: &CheckStatus) -> Vec<(String, String)> {
    vec![(
        SmsId::FIELD.to_owned(),
        request
            .sms_ids()
            .iter()
            .map(SmsId::as_str)
            .collect::<Vec<_>>()
            .join(","),
    )]
}
