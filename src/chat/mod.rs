//! Chat adapter: conversation turns against the backend assistant.

mod client;
mod types;

pub use client::{ChatClient, CHAT_PATH};
pub(crate) use types::user_type_or_default;
pub use types::{
    ChatEntry, ChatMessage, ChatRequest, ChatResponse, ChatRole, ChatSession, DeliveryStatus,
    DEFAULT_USER_TYPE,
};
