//! # Completion Backend
//!
//! The agent talks to its language model through [`CompletionClient`]. The
//! agent itself never retries; wrap a client in [`RetryingCompletionClient`]
//! to get the retrying behaviour the orchestrator expects from
//! `completion_with_retry`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Per-call options forwarded to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    /// System prompt sent ahead of the user prompt.
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Failures reported by a completion backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The call may succeed if repeated (rate limits, 5xx, dropped
    /// connections).
    #[error("Transient completion failure: {message}")]
    Transient { message: String },

    /// The call will keep failing (bad credentials, rejected request,
    /// unreadable response).
    #[error("Completion failed: {message}")]
    Terminal { message: String },

    /// The backend did not answer in time.
    #[error("Completion timed out after {after:?}")]
    Timeout { after: Duration },
}

impl CompletionError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::Transient { .. } | CompletionError::Timeout { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CompletionError::Transient { .. } => "COMPLETION_TRANSIENT",
            CompletionError::Terminal { .. } => "COMPLETION_FAILED",
            CompletionError::Timeout { .. } => "COMPLETION_TIMEOUT",
        }
    }
}

/// Text-generation backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt` and return the generated text.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

/// How a [`RetryingCompletionClient`] spaces its attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for every further one.
    pub initial_backoff: Duration,
    /// Upper bound for a single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (starting at 0).
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Retries retryable failures of an inner client with exponential backoff.
///
/// Terminal errors and the last retryable error are returned unchanged.
pub struct RetryingCompletionClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: CompletionClient> RetryingCompletionClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for RetryingCompletionClient<C> {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let mut retry = 0;
        loop {
            match self.inner.complete(prompt, options).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && retry < self.policy.max_retries => {
                    let delay = self.policy.backoff(retry);
                    tracing::warn!(
                        error = %err,
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Completion failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
