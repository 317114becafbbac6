//! Resolve client.

use super::types::{ResolveRequest, ResolveResponse};
use crate::{ApiClient, Result};
use std::sync::Arc;

pub const RESOLVE_PATH: &str = "/api/resolve";

/// Adapter for `POST /api/resolve`. Every call is a fresh round trip.
#[derive(Clone)]
pub struct ResolveClient {
    api: Arc<ApiClient>,
}

impl ResolveClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Submit a name/type/issue triple. Failures come back normalized; there is
    /// no retry and no synthesized fallback response.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse> {
        self.api.post_json(RESOLVE_PATH, request).await
    }
}
