//! Retry decorator for chat clients
//!
//! Rate-limit responses back off exponentially (`base * 2^attempt`); other
//! retryable failures back off linearly (`base * attempt`). A server's
//! `Retry-After` is honoured up to `base * 2^max_attempts`. Errors that can't
//! succeed on a second try are returned straight away.

use super::client::ChatClient;
use super::error::BackendError;
use super::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before the attempt following failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, error: &BackendError, attempt: u32) -> Duration {
        match error {
            BackendError::RateLimited {
                retry_after: Some(seconds),
            } => Duration::from_secs(*seconds).min(self.max_delay()),
            BackendError::RateLimited { retry_after: None } => {
                self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
            }
            _ => self.base_delay.saturating_mul(attempt),
        }
    }

    /// Upper bound on a server-supplied `Retry-After`: `base * 2^max_attempts`
    pub fn max_delay(&self) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(self.max_attempts))
    }
}

pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: ChatClient> RetryingClient<C> {
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
impl<C: ChatClient> ChatClient for RetryingClient<C> {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        let mut attempt = 1;
        loop {
            match self.inner.chat(request.clone()).await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(attempt, "Completion succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(&e, attempt);
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Completion failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model_info(&self) -> Option<String> {
        self.inner.model_info()
    }
}
