use super::calls::CallTracker;
use crate::chat::{
    user_type_or_default, ChatClient, ChatEntry, ChatMessage, ChatResponse, ChatSession,
    DeliveryStatus,
};
use crate::error::ApiError;
use crate::normalize::{log_error, user_message};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatEntry>,
    pub session_id: Option<String>,
    pub loading: bool,
    /// Localized message of the last failure.
    pub error: Option<String>,
    pub quick_replies: Vec<String>,
}

impl ChatState {
    fn set_status(&mut self, id: u64, status: DeliveryStatus) {
        if let Some(entry) = self.messages.iter_mut().find(|e| e.id == id) {
            entry.status = status;
        }
    }

    fn adopt(&mut self, resp: &ChatResponse) {
        if let Some(id) = resp.session_id.as_ref().filter(|s| !s.is_empty()) {
            self.session_id = Some(id.clone());
        }
        self.quick_replies = resp.quick_replies.clone();
    }
}

/// State binding for [`ChatClient`].
///
/// User messages are shown as soon as they are sent (`Pending`) and then
/// marked `Confirmed` or `Failed`; they are never removed.
pub struct ChatController {
    client: ChatClient,
    user_type: String,
    state: watch::Sender<ChatState>,
    calls: CallTracker,
    next_entry: AtomicU64,
}

impl ChatController {
    pub fn new(client: ChatClient, user_type: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self {
            client,
            user_type: user_type_or_default(user_type.into()),
            state,
            calls: CallTracker::new(),
            next_entry: AtomicU64::new(1),
        }
    }

    pub fn user_type(&self) -> &str {
        &self.user_type
    }

    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    /// The conversation so far, once the backend has assigned a session.
    pub fn session(&self) -> Option<ChatSession> {
        let s = self.state.borrow();
        Some(ChatSession {
            session_id: s.session_id.clone()?,
            messages: s.messages.iter().map(|e| e.message.clone()).collect(),
            user_type: self.user_type.clone(),
        })
    }

    fn entry_id(&self) -> u64 {
        self.next_entry.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one user turn within the current session.
    pub async fn send_message(&self, text: &str) -> Result<ChatResponse, ApiError> {
        if self.calls.is_cancelled() {
            return Err(CallTracker::cancelled_error());
        }
        let seq = self.calls.begin();
        let user_entry = self.entry_id();
        let mut session_id = None;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.messages
                .push(ChatEntry::pending(user_entry, ChatMessage::user(text)));
            session_id = s.session_id.clone();
        });

        let outcome = self
            .calls
            .run(
                self.client
                    .send_message(text, &self.user_type, session_id.as_deref()),
            )
            .await;

        let latest = self.calls.is_latest(seq);
        if self.calls.is_cancelled() {
            self.state.send_modify(|s| {
                s.set_status(user_entry, DeliveryStatus::Failed);
                if latest {
                    s.loading = false;
                }
            });
            return outcome;
        }

        match &outcome {
            Ok(resp) => {
                let bot_entry = self.entry_id();
                self.state.send_modify(|s| {
                    s.set_status(user_entry, DeliveryStatus::Confirmed);
                    if latest {
                        s.messages.push(ChatEntry::confirmed(
                            bot_entry,
                            ChatMessage::bot(resp.response.clone()),
                        ));
                        s.adopt(resp);
                        s.loading = false;
                    }
                });
            }
            Err(err) => {
                log_error(err, "chat_controller.send_message");
                let message = user_message(err);
                self.state.send_modify(|s| {
                    s.set_status(user_entry, DeliveryStatus::Failed);
                    if latest {
                        s.error = Some(message);
                        s.loading = false;
                    }
                });
            }
        }
        if !latest {
            debug!(seq, "discarding stale chat reply");
        }
        outcome
    }

    /// Start over: clear the history and seed it with the welcome message.
    pub async fn init_chat(&self) -> Result<ChatResponse, ApiError> {
        if self.calls.is_cancelled() {
            return Err(CallTracker::cancelled_error());
        }
        let seq = self.calls.begin();
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.messages.clear();
        });

        let outcome = self.calls.run(self.client.init_chat(&self.user_type)).await;

        if self.calls.is_cancelled() {
            if self.calls.is_latest(seq) {
                self.state.send_if_modified(|s| std::mem::take(&mut s.loading));
            }
            return outcome;
        }
        if !self.calls.is_latest(seq) {
            debug!(seq, "discarding stale chat welcome");
            return outcome;
        }

        match &outcome {
            Ok(resp) => {
                let bot_entry = self.entry_id();
                self.state.send_modify(|s| {
                    s.messages = vec![ChatEntry::confirmed(
                        bot_entry,
                        ChatMessage::bot(resp.response.clone()),
                    )];
                    s.adopt(resp);
                    s.loading = false;
                });
            }
            Err(err) => {
                log_error(err, "chat_controller.init_chat");
                let message = user_message(err);
                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.loading = false;
                });
            }
        }
        outcome
    }

    /// Drop the conversation. Calls still in flight will not write.
    pub fn reset(&self) {
        self.calls.invalidate();
        self.state.send_replace(ChatState::default());
    }

    /// Cancel in-flight calls and refuse new ones.
    ///
    /// A cancelled send marks its own message `Failed` and clears `loading`;
    /// nothing else is written.
    pub fn shutdown(&self) {
        self.calls.cancel();
    }
}
