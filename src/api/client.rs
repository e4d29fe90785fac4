//! HTTP client with auth header injection and status handling.
//!
//! Every request carries all four credential headers, even empty ones;
//! the backend ignores tokens it does not need. A 401 raises the matching
//! auth dialog on `AppState` before failing.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::state::{AppState, Credentials};

const USER_TOKEN_HEADER: &str = "x-user-token";
const CUSTOM_AUTH_HEADER: &str = "x-custom-auth";
const ADMIN_AUTH_HEADER: &str = "x-admin-auth";

/// Paths under this prefix use the admin password.
const ADMIN_PATH_PREFIX: &str = "/admin";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized, your access password is wrong")]
    Unauthorized,

    #[error("Unauthorized, your admin password is wrong")]
    AdminUnauthorized,

    #[error("Code {status}: {body}")]
    Status { status: u16, body: String },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl ApiError {
    /// Status code carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized | ApiError::AdminUnauthorized => {
                Some(StatusCode::UNAUTHORIZED.as_u16())
            }
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::InvalidHeader(_) => None,
        }
    }
}

/// Method and optional JSON body for `ApiClient::request`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self { method, body: None }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client wrapper for the temp-mail backend.
///
/// Reads credentials from the shared `AppState` on every request and
/// writes the loading flag and auth dialog toggles back to it.
pub struct ApiClient {
    client: Client,
    base_url: String,
    state: Arc<AppState>,
}

impl ApiClient {
    /// Create a new API client bound to the given session.
    pub fn new(config: &ClientConfig, state: Arc<AppState>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            state,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a GET request to a relative API path.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::default()).await
    }

    /// Send a request to a relative API path and return the parsed body.
    ///
    /// The loading flag is held for the whole call and released on every
    /// exit path.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let _loading = self.state.begin_loading();

        let headers = build_headers(&self.state.credentials().await)?;
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", options.method, url);

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED && self.state.open_settings.read().await.auth {
            log::warn!("{} rejected: access password required", path);
            self.state.show_auth_dialog();
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::UNAUTHORIZED && path.starts_with(ADMIN_PATH_PREFIX) {
            log::warn!("{} rejected: admin password required", path);
            self.state.show_admin_auth_dialog();
            return Err(ApiError::AdminUnauthorized);
        }

        let text = resp.text().await?;
        if status.as_u16() >= 300 {
            log::debug!("{} failed with {}", path, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_body(&text))
    }
}

/// Build the credential and content-type headers sent on every request.
fn build_headers(creds: &Credentials) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(USER_TOKEN_HEADER),
        header_value(USER_TOKEN_HEADER, &creds.user_token)?,
    );
    headers.insert(
        HeaderName::from_static(CUSTOM_AUTH_HEADER),
        header_value(CUSTOM_AUTH_HEADER, &creds.custom_auth)?,
    );
    headers.insert(
        HeaderName::from_static(ADMIN_AUTH_HEADER),
        header_value(ADMIN_AUTH_HEADER, &creds.admin_auth)?,
    );
    headers.insert(
        AUTHORIZATION,
        header_value("authorization", &format!("Bearer {}", creds.jwt))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name))
}

/// Lenient body parsing: empty is `Null`, JSON is parsed, anything else is
/// returned as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
