//! 生成后端配置：一次性从环境变量读取，构造后不可变。
//!
//! Text-generation backend configuration.
//!
//! The configuration is read once into an immutable [`GeneratorConfig`] and handed to
//! [`TextGenClientBuilder`](crate::client::TextGenClientBuilder). Nothing in the crate reads
//! the environment after construction.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `REVIEW_AI_API_KEY` | unset (AI path disabled, fallback only) |
//! | `REVIEW_AI_ENDPOINT` | [`DEFAULT_ENDPOINT`] |
//! | `REVIEW_AI_MODEL` | [`DEFAULT_MODEL`] |
//! | `REVIEW_AI_TIMEOUT_SECS` | 30 |
//! | `REVIEW_AI_MAX_RETRIES` | 2 |
//! | `REVIEW_AI_BACKOFF_BASE_MS` | 1000 |
//! | `REVIEW_AI_BACKOFF_MAX_MS` | 30000 |
//! | `REVIEW_AI_POOL_MAX_IDLE_PER_HOST` | 32 |
//! | `REVIEW_AI_PROXY_URL` | unset |

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::client::RetryPolicy;
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_ENDPOINT: &str = "https://platform.qubrid.com/api/v1/qubridai/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            max_tokens: 500,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub sampling: SamplingParams,
    /// Deadline applied to every individual attempt.
    pub attempt_timeout: Duration,
    pub retry: RetryPolicy,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            sampling: SamplingParams::default(),
            attempt_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            pool_max_idle_per_host: 32,
            proxy_url: None,
        }
    }
}

// Keep the credential out of logs.
impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .field("attempt_timeout", &self.attempt_timeout)
            .field("retry", &self.retry)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl GeneratorConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup, so tests do not
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_secs: u64 = parse_var(&get, "REVIEW_AI_TIMEOUT_SECS")?
            .unwrap_or(defaults.attempt_timeout.as_secs());
        let max_retries: u32 =
            parse_var(&get, "REVIEW_AI_MAX_RETRIES")?.unwrap_or(defaults.retry.max_retries);
        let base_ms: u64 = parse_var(&get, "REVIEW_AI_BACKOFF_BASE_MS")?
            .unwrap_or(defaults.retry.base_delay.as_millis() as u64);
        let max_ms: u64 = parse_var(&get, "REVIEW_AI_BACKOFF_MAX_MS")?
            .unwrap_or(defaults.retry.max_delay.as_millis() as u64);
        let pool: usize = parse_var(&get, "REVIEW_AI_POOL_MAX_IDLE_PER_HOST")?
            .unwrap_or(defaults.pool_max_idle_per_host);

        Ok(Self {
            endpoint: get("REVIEW_AI_ENDPOINT").unwrap_or(defaults.endpoint),
            api_key: get("REVIEW_AI_API_KEY"),
            model: get("REVIEW_AI_MODEL").unwrap_or(defaults.model),
            sampling: defaults.sampling,
            attempt_timeout: Duration::from_secs(timeout_secs.max(1)),
            retry: RetryPolicy::new(max_retries, Duration::from_millis(base_ms))
                .with_max_delay(Duration::from_millis(max_ms.max(base_ms))),
            pool_max_idle_per_host: pool,
            proxy_url: get("REVIEW_AI_PROXY_URL"),
        })
    }

    /// Whether a credential is present. Without one every generation call is skipped.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid value {:?}: {}", raw, e),
                ErrorContext::new()
                    .with_field_path(key)
                    .with_source("env_config"),
            )
        }),
    }
}
