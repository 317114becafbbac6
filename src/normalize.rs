//! Error normalization: every failed call becomes one [`ApiError`].
//!
//! Callers never inspect transport errors directly. The client maps whatever
//! went wrong into a [`Failure`], and [`normalize`] reduces that to the
//! canonical shape. [`user_message`] and [`is_retryable`] are pure views over
//! the result and never change it.

use crate::error::ApiError;
use serde_json::Value;
use tracing::error;

pub const GENERIC_RESPONSE_MESSAGE: &str = "An error occurred";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

const MSG_BAD_REQUEST: &str = "البيانات المرسلة غير صحيحة. الرجاء التحقق والمحاولة مجددا.";
const MSG_UNAUTHORIZED: &str = "الرجاء تسجيل الدخول أولا.";
const MSG_FORBIDDEN: &str = "ليس لديك صلاحيات لإجراء هذا الفعل.";
const MSG_NOT_FOUND: &str = "المورد المطلوب غير متوفر.";
const MSG_SERVER: &str = "خطأ في الخادم. الرجاء المحاولة لاحقا.";
const MSG_FALLBACK: &str = "حدث خطأ. الرجاء المحاولة مجددا.";

/// The shapes a failed call can take before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// An HTTP response was received with a non-success status.
    Response { status: u16, body: Option<Value> },
    /// The request was sent but no response arrived.
    NoResponse { detail: String },
    /// A local failure: building the request, reading or decoding the body.
    Unexpected { message: Option<String> },
}

/// Reduce a failure to the canonical error. First match wins.
pub fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::Response { status, body } => {
            let message = body
                .as_ref()
                .and_then(|b| non_empty_str(b, "error").or_else(|| non_empty_str(b, "message")))
                .unwrap_or(GENERIC_RESPONSE_MESSAGE)
                .to_string();
            ApiError {
                status,
                message,
                data: body,
            }
        }
        Failure::NoResponse { detail } => ApiError {
            status: 0,
            message: NETWORK_MESSAGE.to_string(),
            data: Some(Value::String(detail)),
        },
        Failure::Unexpected { message } => {
            let message = message.filter(|m| !m.is_empty());
            ApiError {
                status: 500,
                message: message
                    .clone()
                    .unwrap_or_else(|| UNEXPECTED_MESSAGE.to_string()),
                data: message.map(Value::String),
            }
        }
    }
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Localized, user-facing message for an error.
pub fn user_message(err: &ApiError) -> String {
    match err.status {
        400 => MSG_BAD_REQUEST.to_string(),
        401 => MSG_UNAUTHORIZED.to_string(),
        403 => MSG_FORBIDDEN.to_string(),
        404 => MSG_NOT_FOUND.to_string(),
        500 => MSG_SERVER.to_string(),
        0 => err.message.clone(),
        _ if !err.message.is_empty() => err.message.clone(),
        _ => MSG_FALLBACK.to_string(),
    }
}

/// Client errors (4xx) are never retried; server and network errors may be.
pub fn is_retryable(err: &ApiError) -> bool {
    err.class().retryable()
}

/// Emit one structured log event for a normalized error.
pub fn log_error(err: &ApiError, context: &str) {
    error!(
        status = err.status,
        class = err.class().name(),
        message = err.message.as_str(),
        data = ?err.data,
        context = context,
        "call-helper request failed"
    );
}
