use crate::error_class::ErrorClass;
use serde::Serialize;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Configuration key or field that caused the error (e.g., "base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Canonical representation of any failed backend call.
///
/// `status` mirrors the HTTP status received. `0` means no response arrived
/// (network failure); `500` is also used for local failures that never reached
/// the wire or could not be decoded.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("HTTP {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Taxonomy bucket for this error.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::from_status(self.status)
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}

/// Unified error type for the call-helper client.
#[derive(Debug, Error)]
pub enum Error {
    /// A normalized failure of a backend call.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// The normalized API error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of the normalized error (`0` for network failures).
    pub fn status(&self) -> Option<u16> {
        self.api().map(|e| e.status)
    }

    /// Apply the normalizer to any error of this crate.
    ///
    /// Configuration errors never reached the backend, so they are treated
    /// as unexpected local failures.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            Error::Api(e) => e.clone(),
            Error::Configuration { message, .. } => {
                crate::normalize::normalize(crate::normalize::Failure::Unexpected {
                    message: Some(message.clone()),
                })
            }
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
