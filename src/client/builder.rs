use crate::client::core::ApiClient;
use crate::config::ClientConfig;
use crate::interceptors::{Interceptor, InterceptorPipeline, LoggingInterceptor};
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for the shared [`ApiClient`].
///
/// Without an explicit base URL the builder reads `CALL_HELPER_API_URL` and
/// falls back to `http://localhost:5000`.
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    logging: bool,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            logging: true,
            interceptors: Vec::new(),
        }
    }

    /// Use an already-resolved configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.base_url = Some(config.base_url);
        self.timeout = Some(config.timeout);
        self
    }

    /// Override the backend origin (also how tests point at a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the 30 second default. Applies to every call made by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Drop the default [`LoggingInterceptor`].
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Add a hook that runs after the logging interceptor.
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut config = match self.base_url {
            Some(url) => ClientConfig::new(url)?,
            None => ClientConfig::from_env()?,
        };
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        let transport = HttpTransport::new(&config)?;

        let mut pipeline = InterceptorPipeline::new();
        if self.logging {
            pipeline = pipeline.with(LoggingInterceptor);
        }
        for ic in self.interceptors {
            pipeline.push(ic);
        }

        Ok(ApiClient {
            transport,
            interceptors: pipeline,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
