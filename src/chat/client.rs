//! Chat client.

use super::types::{ChatRequest, ChatResponse};
use crate::{ApiClient, Result};
use std::sync::Arc;

pub const CHAT_PATH: &str = "/api/chat";

/// Adapter for `POST /api/chat`.
///
/// Holds no conversation state; the caller passes the session id it was given.
#[derive(Clone)]
pub struct ChatClient {
    api: Arc<ApiClient>,
}

impl ChatClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The single primitive both operations are built on.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.api.post_json(CHAT_PATH, request).await
    }

    pub async fn send_message(
        &self,
        message: &str,
        user_type: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse> {
        self.send(&ChatRequest::message(message, user_type).with_session(session_id))
            .await
    }

    /// Fetch the opening message and a fresh session id.
    pub async fn init_chat(&self, user_type: &str) -> Result<ChatResponse> {
        self.send(&ChatRequest::welcome(user_type)).await
    }
}
