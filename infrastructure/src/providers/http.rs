//! Shared HTTP plumbing for provider adapters

use astris_application::GatewayError;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Longest provider error body kept in a failure reason
const MAX_ERROR_BODY: usize = 200;

/// Build the client shared by every adapter.
///
/// Only the connect phase is bounded here; whole-call timeouts belong to
/// the invokers.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("Astris/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Send a prepared request and decode its JSON body.
///
/// Non-2xx statuses become [`GatewayError::HttpStatus`]; a body that is not
/// JSON becomes [`GatewayError::Malformed`].
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, GatewayError> {
    let response = request.send().await.map_err(from_network_error)?;
    let status = response.status();
    let body = response.text().await.map_err(from_network_error)?;

    if !status.is_success() {
        return Err(from_http_status(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::Malformed(e.to_string()))
}

/// Convert an HTTP status code and error body into a gateway error
pub(crate) fn from_http_status(status: StatusCode, body: &str) -> GatewayError {
    GatewayError::HttpStatus {
        status: status.as_u16(),
        body: truncate(body.trim(), MAX_ERROR_BODY),
    }
}

/// Convert network/connection errors into a gateway error
pub(crate) fn from_network_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Connection(format!("Connection failed: {}", e))
    } else if let Some(status) = e.status() {
        from_http_status(status, &e.to_string())
    } else if e.is_decode() || e.is_body() {
        GatewayError::Malformed(e.to_string())
    } else {
        GatewayError::Other(e.to_string())
    }
}

/// Pull a provider-reported error message out of a JSON body, if any.
///
/// Handles both `{"error": "..."}` and `{"error": {"message": "..."}}`.
pub(crate) fn provider_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
