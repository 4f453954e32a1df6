// Caller-supplied retry policy
// Wraps dispatch from the outside; dispatch itself is always single-attempt
use crate::application::dispatch::invoke;
use crate::domain::Operation;
use crate::error::{Result, RulesError};
use crate::port::RuleTransport;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on a single backoff delay
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(300);

/// Upper bound on the backoff factor
pub const MAX_BACKOFF_FACTOR: f64 = 16.0;

/// Retry decision result
#[derive(Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try again after this delay
    Retry(Duration),
    /// Return the error to the caller
    GiveUp,
}

/// Retry policy for transient rule-service failures
///
/// Only errors for which [`RulesError::is_retryable`] holds are repeated:
/// connect/timeout failures and 502/503/504 rejections.
///
/// Backoff formula:
/// delay = base_delay * (backoff_factor ^ (attempt - 1))
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    backoff_factor: f64,
}

impl RetryPolicy {
    /// Create a new retry policy
    ///
    /// # Arguments
    /// * `max_attempts` - Total attempts including the first (clamped to at least 1)
    /// * `base_delay` - Delay before the second attempt
    ///
    /// # Example
    /// ```text
    /// let policy = RetryPolicy::new(3, Duration::from_millis(200));
    /// let output = policy.invoke::<ResolveBeamCollisions>(transport, &input).await?;
    /// ```
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff_factor: 2.0,
        }
    }

    /// Exactly one attempt
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Set the backoff factor (clamped to `[1.0, MAX_BACKOFF_FACTOR]`; NaN means 1.0)
    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = if backoff_factor.is_nan() {
            1.0
        } else {
            backoff_factor.clamp(1.0, MAX_BACKOFF_FACTOR)
        };
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decide what to do after `attempt` (1-based) failed with `error`
    pub fn should_retry(&self, error: &RulesError, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts || !error.is_retryable() {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry(self.delay_for(attempt))
    }

    /// Delay after failed attempt `attempt` (1-based), capped at [`MAX_RETRY_DELAY`]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.base_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(MAX_RETRY_DELAY)
            .min(MAX_RETRY_DELAY)
    }

    /// Invoke an operation, repeating transient failures
    pub async fn invoke<O: Operation>(
        &self,
        transport: &dyn RuleTransport,
        input: &O::Input,
    ) -> Result<O::Output> {
        let mut attempt = 1;
        loop {
            match invoke::<O>(transport, input).await {
                Ok(output) => return Ok(output),
                Err(err) => match self.should_retry(&err, attempt) {
                    RetryDecision::Retry(delay) => {
                        warn!(
                            operation = O::NAME,
                            attempt = attempt,
                            max_attempts = self.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Retrying rule invocation"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    RetryDecision::GiveUp => {
                        if attempt > 1 {
                            info!(
                                operation = O::NAME,
                                attempts = attempt,
                                "Giving up on rule invocation"
                            );
                        }
                        return Err(err);
                    }
                },
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
