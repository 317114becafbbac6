//! The shared HTTP client every adapter is built on.
//!
//! Construct it once at bootstrap and hand an `Arc<ApiClient>` to each adapter.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod error_classification;
mod execution;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
