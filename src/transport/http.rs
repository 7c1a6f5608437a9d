use crate::config::GeneratorConfig;
use crate::Result;
use reqwest::Proxy;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pooled HTTP client bound to one completion endpoint.
///
/// `reqwest::Client` is internally reference counted, so a single transport is shared
/// across every in-flight generation call without serialization.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        // No request timeout here; the per-attempt tokio deadline is the only bound.
        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| TransportError::Other(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST a JSON body and return the raw response, whatever its status.
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        body: &T,
        client_request_id: &str,
    ) -> std::result::Result<reqwest::Response, TransportError> {
        let mut req = self.client.post(&self.endpoint).json(body);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        req.header("accept", "application/json")
            .header("x-review-enrich-request-id", client_request_id)
            .send()
            .await
            .map_err(TransportError::Http)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
