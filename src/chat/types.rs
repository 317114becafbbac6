//! Chat types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User type sent when the caller does not name one ("Umrah company").
pub const DEFAULT_USER_TYPE: &str = "شركة عمرة";

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub is_first: bool,
}

impl ChatRequest {
    pub fn message(message: impl Into<String>, user_type: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_type: user_type_or_default(user_type.into()),
            session_id: None,
            is_first: false,
        }
    }

    /// The opening call of a conversation: empty message, `is_first: true`.
    pub fn welcome(user_type: impl Into<String>) -> Self {
        Self {
            message: String::new(),
            user_type: user_type_or_default(user_type.into()),
            session_id: None,
            is_first: true,
        }
    }

    pub fn with_session(mut self, session_id: Option<impl Into<String>>) -> Self {
        self.session_id = session_id.map(Into::into);
        self
    }
}

/// A blank user type falls back to [`DEFAULT_USER_TYPE`].
pub(crate) fn user_type_or_default(user_type: String) -> String {
    if user_type.trim().is_empty() {
        DEFAULT_USER_TYPE.to_string()
    } else {
        user_type
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub quick_replies: Vec<String>,
    /// Assigned by the backend; echo it on every following call.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Whether the backend has acknowledged a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Shown optimistically; the call has not settled.
    Pending,
    Confirmed,
    /// The call failed. The entry stays so the UI can offer a resend.
    Failed,
}

/// A message as held client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Unique within the owning controller; stable across list edits.
    #[serde(default)]
    pub id: u64,
    #[serde(flatten)]
    pub message: ChatMessage,
    pub status: DeliveryStatus,
}

impl ChatEntry {
    pub fn pending(id: u64, message: ChatMessage) -> Self {
        Self {
            id,
            message,
            status: DeliveryStatus::Pending,
        }
    }

    pub fn confirmed(id: u64, message: ChatMessage) -> Self {
        Self {
            id,
            message,
            status: DeliveryStatus::Confirmed,
        }
    }

    pub fn role(&self) -> ChatRole {
        self.message.role
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    pub user_type: String,
}
