use crate::domain::{
    MessageText, PartnerId, RawPhoneNumber, SendOptions, SendSms, SendTime, SenderId, TtlMinutes,
};

/// Relative path of the send endpoint.
pub const SEND_SMS_PATH: &str = "sms/send";

/// Encode a [`SendSms`] request into ordered query parameters.
///
/// Recipients join with `,` in original order. Optional parameters are omitted
/// entirely when unset; the tri-state flags encode `Some(true)` as `1` and
/// `Some(false)` as `0`.
pub fn encode_send_sms_query(request: &SendSms) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    let to = request
        .recipients()
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), to));
    params.push((
        MessageText::FIELD.to_owned(),
        request.msg().as_str().to_owned(),
    ));
    push_options(&mut params, request.options());

    params
}

fn push_options(params: &mut Vec<(String, String)>, options: &SendOptions) {
    if let Some(from) = options.from.as_ref() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    if let Some(ip) = options.ip {
        params.push(("ip".to_owned(), ip.to_string()));
    }
    if let Some(time) = options.time {
        params.push((SendTime::FIELD.to_owned(), time.value().to_string()));
    }
    if let Some(ttl) = options.ttl {
        params.push((TtlMinutes::FIELD.to_owned(), ttl.value().to_string()));
    }
    push_flag(params, "daytime", options.daytime);
    push_flag(params, "transit", options.transit);
    push_flag(params, "test", options.test);
    if let Some(partner_id) = options.partner_id.as_ref() {
        params.push((PartnerId::FIELD.to_owned(), partner_id.as_str().to_owned()));
    }
    for (key, value) in &options.extra {
        params.push((key.clone(), value.clone()));
    }
}

fn push_flag(params: &mut Vec<(String, String)>, field: &str, value: Option<bool>) {
    if let Some(value) = value {
        params.push((field.to_owned(), if value { "1" } else { "0" }.to_owned()));
    }
}
