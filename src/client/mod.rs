//! Client layer: orchestrates transport calls and maps wire payloads to domain types.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::{
    ApiId, CheckCost, CheckCostResponse, CheckStatus, CheckStatusResponse, Login, Password,
    SendSms, SendSmsResponse, ValidationError,
};
use crate::transport;

const DEFAULT_BASE_URL: &str = "https://sms.ru/";

/// Fallback message when an error response carries no `status_text`.
const UNKNOWN_ERROR: &str = "Unknown error";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        params: &'a [(String, String)],
    ) -> BoxFuture<'a, Result<String, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        params: &'a [(String, String)],
    ) -> BoxFuture<'a, Result<String, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .query(params)
                .send()
                .await?
                .error_for_status()?;
            let body = response.text().await?;
            Ok(body)
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for SMS.RU API calls.
///
/// Mode selection is explicit: use [`Auth::api_id`] when you have an `api_id`
/// token, or [`Auth::login_password`] if you authenticate with a login/password
/// pair. Exactly one parameter set is attached to every outgoing request.
pub enum Auth {
    /// Authenticate via SMS.RU `api_id`.
    ApiId(ApiId),
    /// Authenticate via SMS.RU `login` + `password`.
    LoginPassword { login: Login, password: Password },
}

impl Auth {
    /// Create [`Auth::ApiId`] and validate that the value is non-empty after trimming.
    pub fn api_id(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::ApiId(ApiId::new(value)?))
    }

    /// Create [`Auth::LoginPassword`] and validate that both parts are non-empty.
    pub fn login_password(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::LoginPassword {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    fn push_query_params(&self, params: &mut Vec<(String, String)>) {
        match self {
            Self::ApiId(api_id) => {
                params.push((ApiId::FIELD.to_owned(), api_id.as_str().to_owned()));
            }
            Self::LoginPassword { login, password } => {
                params.push((Login::FIELD.to_owned(), login.as_str().to_owned()));
                params.push((Password::FIELD.to_owned(), password.as_str().to_owned()));
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsRuClient`].
///
/// Wire-level failures come in two shapes: [`SmsRuError::Api`] when the provider
/// answered but flagged the call as failed, and [`SmsRuError::Transport`] when the
/// HTTP exchange itself broke (DNS, TLS, timeouts, non-2xx statuses).
pub enum SmsRuError {
    /// HTTP client / transport failure, propagated from the HTTP layer untranslated.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body was not valid JSON, or did not match the declared response shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The provider returned a response whose `status` is not `"OK"`.
    ///
    /// `message` is the provider's `status_text`, or `"Unknown error"` when absent;
    /// `body` is the full decoded response for diagnostic inspection.
    #[error("API error: {message}")]
    Api {
        message: String,
        body: serde_json::Value,
    },

    /// The configured base URL or endpoint path did not form a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SmsRuClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SmsRuClientBuilder {
    auth: Auth,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsRuClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (`https://sms.ru/` by default).
    ///
    /// Endpoint paths are resolved relative to it, so the value should end with `/`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsRuClient`].
    pub fn build(self) -> Result<SmsRuClient, SmsRuError> {
        let base_url = Url::parse(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsRuError::Transport(Box::new(err)))?;

        Ok(SmsRuClient {
            auth: self.auth,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level SMS.RU client.
///
/// Holds the authentication mode and the base URL, both immutable after
/// construction; cloning shares the underlying HTTP client. Every operation is a
/// single GET against `base_url + path` with `json=1` forced, followed by the
/// uniform success check on the response body's `status` field.
pub struct SmsRuClient {
    auth: Auth,
    base_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SmsRuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsRuClient")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SmsRuClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`SmsRuClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is well-formed"),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> SmsRuClientBuilder {
        SmsRuClientBuilder::new(auth)
    }

    /// Send an SMS message through SMS.RU (`sms/send`).
    ///
    /// Errors:
    /// - [`SmsRuError::Api`] when SMS.RU answers with a non-`OK` status,
    /// - [`SmsRuError::Transport`] for HTTP-level failures,
    /// - [`SmsRuError::Parse`] when the body is not the declared JSON shape.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, SmsRuError> {
        self.api_request(
            transport::SEND_SMS_PATH,
            transport::encode_send_sms_query(&request),
        )
        .await
    }

    /// Check delivery status of already sent messages (`sms/status`).
    ///
    /// The response maps each queried id to the status the provider reports for it.
    pub async fn check_status(
        &self,
        request: CheckStatus,
    ) -> Result<CheckStatusResponse, SmsRuError> {
        self.api_request(
            transport::CHECK_STATUS_PATH,
            transport::encode_check_status_query(&request),
        )
        .await
    }

    /// Estimate the cost of a message before sending it (`sms/cost`).
    pub async fn check_cost(&self, request: CheckCost) -> Result<CheckCostResponse, SmsRuError> {
        self.api_request(
            transport::CHECK_COST_PATH,
            transport::encode_check_cost_query(&request),
        )
        .await
    }

    /// Shared request executor.
    ///
    /// Appends the auth parameters and `json=1`, GETs `base_url + path`, and applies
    /// the uniform success check: any decoded body whose `status` is not exactly
    /// `"OK"` is an [`SmsRuError::Api`], regardless of HTTP status code.
    async fn api_request<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<T, SmsRuError> {
        self.auth.push_query_params(&mut params);
        params.push(("json".to_owned(), "1".to_owned()));

        let url = self.base_url.join(path)?;
        debug!(%url, "dispatching SMS.RU API request");

        let body = self
            .http
            .get(url.as_str(), &params)
            .await
            .map_err(SmsRuError::Transport)?;

        let value: serde_json::Value = serde_json::from_str(&body)?;
        let status = value.get("status").and_then(serde_json::Value::as_str);
        if status != Some("OK") {
            let message = value
                .get("status_text")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(UNKNOWN_ERROR)
                .to_owned();
            debug!(%url, %message, "SMS.RU API reported an error");
            return Err(SmsRuError::Api {
                message,
                body: value,
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{
        CheckCostOptions, MessageText, RawPhoneNumber, SendOptions, SendTime, SmsId, Status,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        response: Result<String, String>,
    }

    impl FakeTransport {
        fn new(body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_params: Vec::new(),
                    response: Ok(body.into()),
                })),
            }
        }

        fn failing(message: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_params: Vec::new(),
                    response: Err(message.into()),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            url: &'a str,
            params: &'a [(String, String)],
        ) -> BoxFuture<'a, Result<String, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let response = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_params = params.to_vec();
                    state.response.clone()
                };
                response.map_err(|message| {
                    Box::new(std::io::Error::other(message)) as Box<dyn StdError + Send + Sync>
                })
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn assert_no_param(params: &[(String, String)], key: &str) {
        assert!(
            !params.iter().any(|(k, _)| k == key),
            "unexpected param {key}; got: {params:?}"
        );
    }

    fn make_client(auth: Auth, transport: FakeTransport) -> SmsRuClient {
        SmsRuClient {
            auth,
            base_url: Url::parse("https://example.invalid/").unwrap(),
            http: Arc::new(transport),
        }
    }

    fn send_request() -> SendSms {
        SendSms::to_one(
            RawPhoneNumber::new("+79251234567").unwrap(),
            MessageText::new("hello").unwrap(),
            SendOptions::default(),
        )
    }

    #[tokio::test]
    async fn send_sms_attaches_api_id_json_flag_and_parses_ok_response() {
        let json = r#"
        {
          "status": "OK",
          "status_code": 100,
          "balance": "10.00",
          "sms": {
            "+79251234567": {
              "status": "OK",
              "status_code": 100,
              "sms_id": "abc123"
            }
          }
        }
        "#;

        let transport = FakeTransport::new(json);
        let client = make_client(Auth::api_id("test_key").unwrap(), transport.clone());

        let response = client.send_sms(send_request()).await.unwrap();
        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.status_code, 100);
        assert_eq!(
            response.balance.as_ref().map(|it| it.as_str()),
            Some("10.00")
        );
        assert_eq!(
            response.sms.get("+79251234567").unwrap().sms_id.as_deref(),
            Some("abc123")
        );

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms/send"));
        assert_param(&params, "api_id", "test_key");
        assert_param(&params, "json", "1");
        assert_param(&params, "to", "+79251234567");
        assert_param(&params, "msg", "hello");
        assert_no_param(&params, "login");
        assert_no_param(&params, "password");
    }

    #[tokio::test]
    async fn send_sms_attaches_login_password_auth() {
        let transport = FakeTransport::new(r#"{"status": "OK", "status_code": 100, "sms": {}}"#);
        let client = make_client(
            Auth::login_password("user", "pass").unwrap(),
            transport.clone(),
        );

        client.send_sms(send_request()).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "login", "user");
        assert_param(&params, "password", "pass");
        assert_param(&params, "json", "1");
        assert_no_param(&params, "api_id");
    }

    #[tokio::test]
    async fn send_sms_omits_unset_flags_and_encodes_explicit_false() {
        let transport = FakeTransport::new(r#"{"status": "OK", "status_code": 100, "sms": {}}"#);
        let client = make_client(Auth::api_id("test_key").unwrap(), transport.clone());

        let request = SendSms::to_one(
            RawPhoneNumber::new("+79251234567").unwrap(),
            MessageText::new("hello").unwrap(),
            SendOptions {
                time: Some(SendTime::Timestamp(1_700_000_000_000)),
                daytime: Some(false),
                test: Some(true),
                ..Default::default()
            },
        );
        client.send_sms(request).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "time", "1700000000000");
        assert_param(&params, "daytime", "0");
        assert_param(&params, "test", "1");
        assert_no_param(&params, "transit");
    }

    #[tokio::test]
    async fn api_error_carries_status_text_and_raw_body() {
        let transport =
            FakeTransport::new(r#"{"status": "ERROR", "status_text": "no credits"}"#);
        let client = make_client(Auth::api_id("bad_key").unwrap(), transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        match err {
            SmsRuError::Api { message, body } => {
                assert_eq!(message, "no credits");
                assert_eq!(
                    body.get("status").and_then(serde_json::Value::as_str),
                    Some("ERROR")
                );
                assert_eq!(
                    body.get("status_text").and_then(serde_json::Value::as_str),
                    Some("no credits")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_error_without_status_text_uses_fallback_message() {
        let transport = FakeTransport::new(r#"{"status": "ERROR"}"#);
        let client = make_client(Auth::api_id("bad_key").unwrap(), transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        match err {
            SmsRuError::Api { message, .. } => assert_eq!(message, "Unknown error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_status_field_is_treated_as_error() {
        let transport = FakeTransport::new(r#"{"balance": "10.00"}"#);
        let client = make_client(Auth::api_id("test_key").unwrap(), transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert!(matches!(err, SmsRuError::Api { .. }));
    }

    #[tokio::test]
    async fn transport_failures_propagate_untranslated() {
        let transport = FakeTransport::failing("connection refused");
        let client = make_client(Auth::api_id("test_key").unwrap(), transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        match err {
            SmsRuError::Transport(source) => {
                assert!(source.to_string().contains("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_body_maps_to_parse_error() {
        let transport = FakeTransport::new("{ not json }");
        let client = make_client(Auth::api_id("test_key").unwrap(), transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert!(matches!(err, SmsRuError::Parse(_)));
    }

    #[tokio::test]
    async fn check_status_uses_status_path_and_parses_ok_response() {
        let json = r#"
        {
          "status": "OK",
          "status_code": 100,
          "balance": 10.00,
          "sms": {
            "000000-000001": {
              "status": "OK",
              "status_code": 103,
              "cost": 0.50
            }
          }
        }
        "#;
        let transport = FakeTransport::new(json);
        let client = make_client(Auth::api_id("test_key").unwrap(), transport.clone());

        let request = CheckStatus::one(SmsId::new("000000-000001").unwrap());
        let response = client.check_status(request).await.unwrap();
        assert_eq!(response.status, Status::Ok);
        assert_eq!(
            response
                .sms
                .get("000000-000001")
                .and_then(|it| it.cost.as_ref())
                .map(|it| it.as_str()),
            Some("0.50")
        );

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms/status"));
        assert_param(&params, "api_id", "test_key");
        assert_param(&params, "json", "1");
        assert_param(&params, "sms_id", "000000-000001");
    }

    #[tokio::test]
    async fn check_cost_uses_cost_path_and_parses_ok_response() {
        let json = r#"
        {
          "status": "OK",
          "status_code": 100,
          "total_cost": "1.50",
          "total_sms": 3,
          "sms": {}
        }
        "#;
        let transport = FakeTransport::new(json);
        let client = make_client(Auth::api_id("test_key").unwrap(), transport.clone());

        let request = CheckCost::to_one(
            RawPhoneNumber::new("+79251234567").unwrap(),
            MessageText::new("hello").unwrap(),
            CheckCostOptions {
                transit: Some(false),
                ..Default::default()
            },
        );
        let response = client.check_cost(request).await.unwrap();
        assert_eq!(
            response.total_cost.as_ref().map(|it| it.as_str()),
            Some("1.50")
        );
        assert_eq!(response.total_sms, Some(3));

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms/cost"));
        assert_param(&params, "to", "+79251234567");
        assert_param(&params, "msg", "hello");
        assert_param(&params, "transit", "0");
        assert_param(&params, "json", "1");
    }

    #[test]
    fn auth_constructors_validate_inputs() {
        assert!(Auth::api_id("   ").is_err());
        assert!(Auth::login_password("", "pass").is_err());
        assert!(Auth::login_password("user", "").is_err());
    }

    #[test]
    fn builder_applies_base_url_override() {
        let client = SmsRuClient::builder(Auth::api_id("key").unwrap())
            .base_url("https://example.invalid/")
            .build()
            .unwrap();
        assert_eq!(client.base_url.as_str(), "https://example.invalid/");

        let err = SmsRuClient::builder(Auth::api_id("key").unwrap())
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, SmsRuError::Url(_)));
    }
}
