//! Resolve adapter: submit a caller's issue and get the best matching case.

mod client;
mod types;

pub use client::{ResolveClient, RESOLVE_PATH};
pub use types::{
    MatchResult, ResolveRequest, ResolveResponse, ASSUMED_MAX_SCORE, USER_TYPE_EXTERNAL,
    USER_TYPE_UMRAH,
};
