use crate::client::core::TextGenClient;
use crate::client::RetryPolicy;
use crate::config::GeneratorConfig;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`TextGenClient`].
///
/// Keep this surface area small and predictable: start from a [`GeneratorConfig`]
/// (usually [`GeneratorConfig::from_env`]) and override only what a caller or test needs.
#[derive(Debug, Clone, Default)]
pub struct TextGenClientBuilder {
    config: GeneratorConfig,
}

impl TextGenClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Drop any configured credential; every call then fails fast with `AiUnavailable`.
    pub fn without_api_key(mut self) -> Self {
        self.config.api_key = None;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.config.attempt_timeout = timeout;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.retry.max_retries = n;
        self
    }

    pub fn backoff_base(mut self, base: Duration) -> Self {
        self.config.retry.base_delay = base;
        if self.config.retry.max_delay < base {
            self.config.retry.max_delay = base;
        }
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Build the client. Fails only on an unusable endpoint or HTTP client setup.
    pub fn build(self) -> Result<TextGenClient> {
        validate_endpoint(&self.config.endpoint)?;

        let transport = Arc::new(HttpTransport::new(&self.config)?);
        Ok(TextGenClient {
            transport,
            model: self.config.model,
            sampling: self.config.sampling,
            attempt_timeout: self.config.attempt_timeout,
            retry: self.config.retry,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let parsed = url::Url::parse(endpoint).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid endpoint URL: {}", e),
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_details(endpoint.to_string())
                .with_source("client_builder"),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported endpoint scheme: {}", parsed.scheme()),
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_source("client_builder"),
        ));
    }
    Ok(())
}
