//! Request/response hooks run by [`ApiClient`](crate::ApiClient) around every call.
//!
//! The default pipeline contains a single [`LoggingInterceptor`]. Interceptors
//! observe; they cannot change requests or swallow errors.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;

/// What is known about a request before it is sent.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub request_id: String,
}

/// What is known about a received response.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub status: u16,
    pub path: String,
    pub request_id: String,
    pub duration_ms: u128,
}

#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, _ctx: &RequestContext) {}

    async fn on_response(&self, _ctx: &ResponseContext) {}

    /// Called with the already-normalized error, before it is returned.
    async fn on_error(&self, _ctx: &RequestContext, _err: &ApiError) {}
}

/// Logs method + path, status + path, and failures as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn on_request(&self, ctx: &RequestContext) {
        info!(
            method = ctx.method.as_str(),
            path = ctx.path.as_str(),
            request_id = ctx.request_id.as_str(),
            "api request"
        );
    }

    async fn on_response(&self, ctx: &ResponseContext) {
        info!(
            status = ctx.status,
            path = ctx.path.as_str(),
            request_id = ctx.request_id.as_str(),
            duration_ms = ctx.duration_ms,
            "api response"
        );
    }

    async fn on_error(&self, ctx: &RequestContext, err: &ApiError) {
        crate::normalize::log_error(err, &format!("{} {}", ctx.method, ctx.path));
    }
}

/// Hooks run in insertion order.
#[derive(Clone)]
pub struct InterceptorPipeline {
    pub(crate) interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorPipeline {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub async fn request(&self, ctx: &RequestContext) {
        for ic in &self.interceptors {
            ic.on_request(ctx).await;
        }
    }

    pub async fn response(&self, ctx: &ResponseContext) {
        for ic in &self.interceptors {
            ic.on_response(ctx).await;
        }
    }

    pub async fn error(&self, ctx: &RequestContext, err: &ApiError) {
        for ic in &self.interceptors {
            ic.on_error(ctx, err).await;
        }
    }
}

impl Default for InterceptorPipeline {
    fn default() -> Self {
        Self::new().with(LoggingInterceptor)
    }
}
