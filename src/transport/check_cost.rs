use crate::domain::{CheckCost, CheckCostOptions, MessageText, RawPhoneNumber};

/// Relative path of the cost-estimate endpoint.
pub const CHECK_COST_PATH: &str = "sms/cost";

/// Encode a [`CheckCost`] query.
///
/// Recipient and `transit` normalization matches the send encoding; there are no
/// scheduling fields.
pub fn encode_check_cost_query(request: &CheckCost) -> Vec<(String, String)> {
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

fn push_options(params: &mut Vec<(String, String)>, options: &CheckCostOptions) {
    if let Some(transit) = options.transit {
        params.push((
            "transit".to_owned(),
            if transit { "1" } else { "0" }.to_owned(),
        ));
    }
    for (key, value) in &options.extra {
        params.push((key.clone(), value.clone()));
    }
}
