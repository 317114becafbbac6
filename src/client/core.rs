use crate::interceptors::InterceptorPipeline;
use crate::transport::{HttpTransport, RequestBody};
use crate::Result;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use super::builder::ApiClientBuilder;

/// Configured HTTP client for the call-helper backend.
///
/// Holds configuration only; no per-request state. Failures are normalized,
/// reported to the interceptors and returned. The client never retries.
pub struct ApiClient {
    pub(crate) transport: HttpTransport,
    pub(crate) interceptors: InterceptorPipeline,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Build a client from `CALL_HELPER_API_URL` (or the local default).
    pub fn from_env() -> Result<Self> {
        ApiClientBuilder::new().build()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(body).map_err(|e| {
            crate::Error::Api(crate::normalize::normalize(
                crate::normalize::Failure::Unexpected {
                    message: Some(e.to_string()),
                },
            ))
        })?;
        self.execute(Method::POST, path, &[], RequestBody::Json(value))
            .await
    }

    /// POST a multipart form and decode the JSON reply.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        self.execute(Method::POST, path, &[], RequestBody::Multipart(form))
            .await
    }

    /// GET with optional query parameters and decode the JSON reply.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(Method::GET, path, query, RequestBody::Empty)
            .await
    }

    /// Liveness probe: `true` only when `GET /` answers 200.
    pub async fn check_health(&self) -> bool {
        match self.execute_raw(Method::GET, "/").await {
            Ok((status, _)) => status == StatusCode::OK,
            Err(e) => {
                warn!(error = %e, base_url = self.base_url(), "api health check failed");
                false
            }
        }
    }
}
