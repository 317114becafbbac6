//! Mock HTTP server setup for integration tests

use call_helper_client::ApiClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;

/// Test fixture that owns a mock backend and builds clients pointed at it
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn client(&self) -> Arc<ApiClient> {
        Arc::new(
            ApiClient::builder()
                .base_url(&self.base_url)
                .build()
                .expect("client builds"),
        )
    }

    /// JSON POST whose body contains `partial`.
    pub async fn mock_post(
        &mut self,
        path: &str,
        partial: serde_json::Value,
        status: usize,
        body: serde_json::Value,
    ) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(partial))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn mock_get(&mut self, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

/// A client for an address where nothing listens.
pub fn unreachable_client() -> Arc<ApiClient> {
    Arc::new(
        ApiClient::builder()
            .base_url("http://127.0.0.1:1")
            .build()
            .expect("client builds"),
    )
}
