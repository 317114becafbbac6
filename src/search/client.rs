//! Search client.

use super::types::{SearchRequest, SearchResponse};
use crate::{ApiClient, Result};
use std::sync::Arc;

pub const SEARCH_PATH: &str = "/search";

/// Adapter for the multipart `POST /search` endpoint.
#[derive(Clone)]
pub struct SearchClient {
    api: Arc<ApiClient>,
}

impl SearchClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let form = request
            .form_fields()
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });
        self.api.post_multipart(SEARCH_PATH, form).await
    }
}
