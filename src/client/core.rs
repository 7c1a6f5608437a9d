use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use super::error_classification::FailureKind;
use super::policy::{Decision, RetryPolicy};
use super::request::CompletionRequest;
use super::response::parse_completion;
use crate::config::SamplingParams;
use crate::transport::HttpTransport;
use crate::{Error, Result};

/// Anything that can turn a prompt into text.
///
/// The orchestrator only depends on this trait, so it runs unchanged against the HTTP
/// client or a scripted generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` using the generator's default deadline and retry budget.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier recorded alongside generated content.
    fn model(&self) -> &str;
}

/// Per-call overrides for deadline and retry budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub attempt_timeout: Option<Duration>,
    pub max_retries: Option<u32>,
}

impl GenerateOptions {
    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }
}

/// HTTP text-generation client for a single completion endpoint.
pub struct TextGenClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) model: String,
    pub(crate) sampling: SamplingParams,
    pub(crate) attempt_timeout: Duration,
    pub(crate) retry: RetryPolicy,
}

impl TextGenClient {
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn has_credential(&self) -> bool {
        self.transport.has_credential()
    }

    /// Generate with explicit deadline / retry overrides.
    ///
    /// Bounded loop: at most `max_retries + 1` requests, each under `attempt_timeout`,
    /// separated by `base * 2^attempt` sleeps.
    pub async fn generate_with(&self, prompt: &str, opts: GenerateOptions) -> Result<String> {
        if !self.transport.has_credential() {
            return Err(Error::ai_unavailable("no API credential configured"));
        }

        let timeout = opts.attempt_timeout.unwrap_or(self.attempt_timeout);
        let policy = match opts.max_retries {
            Some(n) => self.retry.clone().with_max_retries(n),
            None => self.retry.clone(),
        };
        let request = CompletionRequest::user_prompt(&self.model, prompt, &self.sampling);
        let client_request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut attempt: u32 = 0;
        loop {
            let attempt_start = Instant::now();
            let failure = match self.execute_once(&request, &client_request_id, timeout).await {
                Ok(content) => {
                    info!(
                        request_id = client_request_id.as_str(),
                        attempt,
                        duration_ms = attempt_start.elapsed().as_millis() as u64,
                        total_ms = started.elapsed().as_millis() as u64,
                        "text generation succeeded"
                    );
                    return Ok(content);
                }
                Err(failure) => failure,
            };

            match policy.decide(attempt, &failure) {
                Decision::Retry { delay } => {
                    warn!(
                        request_id = client_request_id.as_str(),
                        attempt,
                        failure_class = failure.class(),
                        error = %failure,
                        delay_ms = delay.as_millis() as u64,
                        "text generation attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Decision::Fail => {
                    warn!(
                        request_id = client_request_id.as_str(),
                        attempts = attempt + 1,
                        failure_class = failure.class(),
                        error = %failure,
                        total_ms = started.elapsed().as_millis() as u64,
                        "text generation failed, retries exhausted"
                    );
                    return Err(Error::retries_exhausted(attempt + 1, failure));
                }
            }
        }
    }

    /// Single attempt (no retry). Every failure is classified, never propagated raw.
    async fn execute_once(
        &self,
        request: &CompletionRequest,
        client_request_id: &str,
        timeout: Duration,
    ) -> std::result::Result<String, FailureKind> {
        let attempt = async {
            let resp = self
                .transport
                .post_json(request, client_request_id)
                .await
                .map_err(|e| FailureKind::Transport(e.to_string()))?;

            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| FailureKind::Transport(e.to_string()))?;

            if !(200..300).contains(&status) {
                return Err(FailureKind::from_status(status, &body));
            }

            parse_completion(&body).map(|parsed| parsed.into_content())
        };

        match tokio::time::timeout(timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(FailureKind::Timeout(timeout)),
        }
    }
}

#[async_trait]
impl TextGenerator for TextGenClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with(prompt, GenerateOptions::default()).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
