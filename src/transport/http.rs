use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::time::Duration;

/// Header carrying our own correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Payload of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; the per-call content type replaces the JSON default.
    Multipart(reqwest::multipart::Form),
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to build HTTP client: {}", e),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send one request. No retries; the caller decides what a failure means.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
        request_id: &str,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id);

        if !query.is_empty() {
            req = req.query(query);
        }

        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(&value),
            RequestBody::Multipart(form) => req.multipart(form),
        };

        req.send().await
    }
}
