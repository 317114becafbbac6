//! Search adapter: the form-based `/search` endpoint.

mod client;
mod types;

pub use client::{SearchClient, SEARCH_PATH};
pub use types::{SearchRequest, SearchResponse};
