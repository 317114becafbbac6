//! Request execution logic (single attempt, no retry).

use crate::error::ApiError;
use crate::interceptors::{RequestContext, ResponseContext};
use crate::normalize::{normalize, Failure};
use crate::transport::RequestBody;
use crate::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::core::ApiClient;
use super::error_classification::{failure_from_transport, parse_error_body};

impl ApiClient {
    /// Run one call and decode a successful body as `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<T> {
        let ctx = self.request_context(&method, path);
        let outcome = match self.execute_once(method, path, query, body, &ctx).await {
            Ok((_, text)) => serde_json::from_str::<T>(&text).map_err(|e| Failure::Unexpected {
                message: Some(e.to_string()),
            }),
            Err(failure) => Err(failure),
        };
        match outcome {
            Ok(v) => Ok(v),
            Err(failure) => Err(Error::Api(self.fail(&ctx, failure).await)),
        }
    }

    /// Run one call and hand back the status and raw body of a 2xx response.
    pub(crate) async fn execute_raw(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(StatusCode, String)> {
        let ctx = self.request_context(&method, path);
        match self
            .execute_once(method, path, &[], RequestBody::Empty, &ctx)
            .await
        {
            Ok(v) => Ok(v),
            Err(failure) => Err(Error::Api(self.fail(&ctx, failure).await)),
        }
    }

    fn request_context(&self, method: &Method, path: &str) -> RequestContext {
        RequestContext {
            method: method.as_str().to_string(),
            path: path.to_string(),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    async fn execute_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
        ctx: &RequestContext,
    ) -> std::result::Result<(StatusCode, String), Failure> {
        self.interceptors.request(ctx).await;

        let start = std::time::Instant::now();
        let resp = self
            .transport
            .send(method, path, query, body, &ctx.request_id)
            .await
            .map_err(failure_from_transport)?;

        let status = resp.status();
        self.interceptors
            .response(&ResponseContext {
                status: status.as_u16(),
                path: ctx.path.clone(),
                request_id: ctx.request_id.clone(),
                duration_ms: start.elapsed().as_millis(),
            })
            .await;

        let text = resp.text().await.map_err(failure_from_transport)?;
        if !status.is_success() {
            return Err(Failure::Response {
                status: status.as_u16(),
                body: parse_error_body(&text),
            });
        }
        Ok((status, text))
    }

    async fn fail(&self, ctx: &RequestContext, failure: Failure) -> ApiError {
        let err = normalize(failure);
        self.interceptors.error(ctx, &err).await;
        err
    }
}
