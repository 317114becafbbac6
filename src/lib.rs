//! # call-helper-client
//!
//! Typed request/response adapters for the call-helper backend, with one
//! uniform error shape for every failure.
//!
//! ## Overview
//!
//! The crate sits between application code and the remote HTTP service. It
//! owns no business logic: matching, scoring and chat generation stay on the
//! backend. What it guarantees is the contract around them:
//!
//! - **One error shape**: every failure becomes an [`ApiError`] (`status` `0`
//!   for network failures, the HTTP status otherwise, `500` for local ones)
//! - **No hidden retries**: the client reports and returns; retrying is the
//!   caller's decision, informed by [`normalize::is_retryable`]
//! - **Explicit bootstrap**: one [`ApiClient`] is built at startup and shared
//!   with every adapter through `Arc`
//! - **Observable state**: [`state`] controllers publish loading/error/result
//!   snapshots and ignore stale or cancelled responses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use call_helper_client::resolve::{ResolveClient, ResolveRequest};
//! use call_helper_client::ApiClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> call_helper_client::Result<()> {
//!     let api = Arc::new(ApiClient::from_env()?);
//!     let resolver = ResolveClient::new(api);
//!
//!     let resp = resolver
//!         .resolve(&ResolveRequest::new("Ali", "umrah", "login fails").with_alternatives(true))
//!         .await?;
//!     if let Some(m) = resp.best_match {
//!         println!("{}", m.display_text().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Shared HTTP client and its builder |
//! | [`normalize`] | Error normalization, localized messages, retryability |
//! | [`error_class`] | Failure taxonomy |
//! | [`interceptors`] | Request/response/error hooks (logging by default) |
//! | [`resolve`] | `POST /api/resolve` adapter |
//! | [`chat`] | `POST /api/chat` adapter |
//! | [`search`] | Multipart `POST /search` adapter |
//! | [`analytics`] | Dashboard statistics adapter |
//! | [`state`] | Observable controllers over the adapters |

pub mod analytics;
pub mod chat;
pub mod client;
pub mod config;
pub mod error_class;
pub mod interceptors;
pub mod normalize;
pub mod resolve;
pub mod search;
pub mod state;
pub mod transport;
pub(crate) mod utils;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error_class::ErrorClass;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error, ErrorContext};
