//! Observable state bound to the adapters.
//!
//! Each controller owns its state exclusively and publishes snapshots through
//! a `tokio::sync::watch` channel. Overlapping calls are allowed; only the most
//! recent call's outcome is applied. `shutdown()` cancels whatever is still in
//! flight and turns later calls away without touching state.

mod calls;
mod chat;
mod resolve;

pub use chat::{ChatController, ChatState};
pub use resolve::{ResolveController, ResolveState};
