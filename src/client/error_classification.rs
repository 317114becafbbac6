//! Mapping of transport errors onto normalization input.

use crate::normalize::Failure;

/// Classify a `reqwest` error.
///
/// Connect, timeout and send failures mean the request left (or tried to
/// leave) but nothing came back. Everything else happened locally.
pub(crate) fn failure_from_transport(err: reqwest::Error) -> Failure {
    if let Some(status) = err.status() {
        return Failure::Response {
            status: status.as_u16(),
            body: None,
        };
    }
    if err.is_connect() || err.is_timeout() || err.is_request() {
        return Failure::NoResponse {
            detail: err.to_string(),
        };
    }
    Failure::Unexpected {
        message: Some(err.to_string()),
    }
}

/// Keep whatever the backend sent: JSON when it parses, raw text otherwise.
pub(crate) fn parse_error_body(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
    )
}
