//! Bounded retry for a single HTTP call.
//!
//! The policy is a small state machine:
//!
//! ```text
//! Attempting --2xx--------------> Succeeded
//!            --401 / other------> Rejected
//!            --429 / 5xx / net--> BackingOff --sleep--> Attempting
//!                                 (or Exhausted once the budget is spent)
//! ```
//!
//! `Rejected` still carries the server's reply; only `Exhausted` means no
//! usable response was obtained.

use crate::error::{ConfigError, NetworkError};
use crate::traits::{HttpReply, HttpTransport};
use crate::utils::logger::PROGRESS_TARGET;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on a server-supplied `Retry-After` hint.
pub const MAX_RETRY_AFTER_SECS: f64 = 300.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub exponential_base: f64,
    /// Scale applied to the exponential term after a network failure.
    pub network_factor: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            exponential_base: 1.5,
            network_factor: 0.5,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, exponential_base: f64) -> Self {
        Self {
            max_retries,
            exponential_base,
            ..Default::default()
        }
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exponential_base.is_finite() || self.exponential_base < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.exponential_base".to_string(),
                reason: format!("must be >= 1.0, got {}", self.exponential_base),
            });
        }
        if !self.network_factor.is_finite() || self.network_factor < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.network_factor".to_string(),
                reason: format!("must be >= 0.0, got {}", self.network_factor),
            });
        }
        Ok(())
    }

    fn jitter_secs(&self) -> f64 {
        if self.jitter {
            rand::thread_rng().gen::<f64>()
        } else {
            0.0
        }
    }

    /// Delay after a 429/5xx. A usable `Retry-After` (capped at
    /// [`MAX_RETRY_AFTER_SECS`]) wins over the exponential schedule; jitter
    /// is added either way.
    pub fn status_delay(&self, attempt: u32, reply: &HttpReply) -> Duration {
        let base = reply
            .retry_after_secs()
            .map(|secs| secs.min(MAX_RETRY_AFTER_SECS))
            .unwrap_or_else(|| self.exponential_base.powi(attempt as i32));
        secs_to_duration(base + self.jitter_secs())
    }

    /// Delay after a connection/timeout failure.
    pub fn network_delay(&self, attempt: u32) -> Duration {
        let base = self.exponential_base.powi(attempt as i32) * self.network_factor;
        secs_to_duration(base + self.jitter_secs())
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Unauthorized,
    Retryable,
    Terminal,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 | 201 | 204 => StatusClass::Success,
        401 => StatusClass::Unauthorized,
        429 | 500..=599 => StatusClass::Retryable,
        _ => StatusClass::Terminal,
    }
}

/// Final result of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The service answered with a final status (success or rejection).
    Responded(HttpReply),
    /// Retry budget spent without a final status.
    Exhausted,
}

impl CallOutcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            CallOutcome::Responded(reply) => Some(reply.status),
            CallOutcome::Exhausted => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Responded(reply) if reply.is_success())
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, CallOutcome::Exhausted)
    }
}

#[derive(Debug, Clone)]
pub struct CallReport {
    pub outcome: CallOutcome,
    pub attempts: u32,
    pub backoffs: Vec<Duration>,
}

#[derive(Debug)]
enum RetryState {
    /// `failures` attempts have failed so far.
    Attempting { failures: u32 },
    BackingOff { failures: u32, delay: Duration },
    Succeeded(HttpReply),
    Rejected(HttpReply),
    Exhausted,
}

pub struct RetryingExecutor {
    config: RetryConfig,
}

impl RetryingExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Runs one call to completion under the retry policy.
    ///
    /// Never returns an error: every path ends in `Responded` or `Exhausted`.
    pub async fn execute<T>(
        &self,
        transport: &T,
        url: &str,
        payload: &Value,
        label: &str,
    ) -> CallReport
    where
        T: HttpTransport + ?Sized,
    {
        let mut attempts = 0u32;
        let mut backoffs = Vec::new();
        let mut state = RetryState::Attempting { failures: 0 };

        loop {
            state = match state {
                RetryState::Attempting { failures } => {
                    attempts += 1;
                    debug!("[{}] PUT {} (attempt {})", label, url, attempts);
                    match transport.put_json(url, payload).await {
                        Ok(reply) => self.on_reply(label, failures, reply),
                        Err(e) => self.on_network_error(label, failures, &e),
                    }
                }
                RetryState::BackingOff { failures, delay } => {
                    backoffs.push(delay);
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting { failures }
                }
                RetryState::Succeeded(reply) => {
                    if attempts > 1 {
                        debug!("{} succeeded on attempt {}", label, attempts);
                    }
                    return CallReport {
                        outcome: CallOutcome::Responded(reply),
                        attempts,
                        backoffs,
                    };
                }
                RetryState::Rejected(reply) => {
                    return CallReport {
                        outcome: CallOutcome::Responded(reply),
                        attempts,
                        backoffs,
                    };
                }
                RetryState::Exhausted => {
                    warn!(
                        target: PROGRESS_TARGET,
                        "[{}] FAILED after {} attempts, no usable response",
                        label, attempts
                    );
                    return CallReport {
                        outcome: CallOutcome::Exhausted,
                        attempts,
                        backoffs,
                    };
                }
            };
        }
    }

    fn on_reply(&self, label: &str, failures: u32, reply: HttpReply) -> RetryState {
        match classify_status(reply.status) {
            StatusClass::Success => RetryState::Succeeded(reply),
            StatusClass::Unauthorized => {
                warn!(
                    target: PROGRESS_TARGET,
                    "[{}] 401 Unauthorized - token may be invalid or expired",
                    label
                );
                RetryState::Rejected(reply)
            }
            StatusClass::Terminal => RetryState::Rejected(reply),
            StatusClass::Retryable => {
                let failures = failures + 1;
                if failures > self.config.max_retries {
                    return RetryState::Exhausted;
                }
                let delay = self.config.status_delay(failures, &reply);
                warn!(
                    target: PROGRESS_TARGET,
                    "[{}] {} from server. Retry {}/{} after {:.1}s",
                    label,
                    reply.status,
                    failures,
                    self.config.max_retries,
                    delay.as_secs_f64()
                );
                RetryState::BackingOff { failures, delay }
            }
        }
    }

    fn on_network_error(&self, label: &str, failures: u32, error: &NetworkError) -> RetryState {
        let failures = failures + 1;
        if failures > self.config.max_retries {
            debug!("[{}] last network error: {}", label, error);
            return RetryState::Exhausted;
        }
        let delay = self.config.network_delay(failures);
        warn!(
            target: PROGRESS_TARGET,
            "[{}] Network error: {}. Retry {}/{} after {:.1}s",
            label,
            error,
            failures,
            self.config.max_retries,
            delay.as_secs_f64()
        );
        RetryState::BackingOff { failures, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), StatusClass::Success);
        assert_eq!(classify_status(204), StatusClass::Success);
        assert_eq!(classify_status(401), StatusClass::Unauthorized);
        assert_eq!(classify_status(429), StatusClass::Retryable);
        assert_eq!(classify_status(500), StatusClass::Retryable);
        assert_eq!(classify_status(599), StatusClass::Retryable);
        assert_eq!(classify_status(400), StatusClass::Terminal);
        assert_eq!(classify_status(403), StatusClass::Terminal);
        assert_eq!(classify_status(202), StatusClass::Terminal);
    }

    #[test]
    fn test_status_delay_exponential_without_hint() {
        let config = RetryConfig::default().without_jitter();
        let reply = HttpReply::new(503);
        assert_eq!(config.status_delay(1, &reply), Duration::from_secs_f64(1.5));
        assert_eq!(config.status_delay(2, &reply), Duration::from_secs_f64(2.25));
    }

    #[test]
    fn test_status_delay_prefers_retry_after() {
        let config = RetryConfig::default().without_jitter();
        let reply = HttpReply::new(429).with_retry_after("7");
        assert_eq!(config.status_delay(4, &reply), Duration::from_secs(7));

        let garbage = HttpReply::new(429).with_retry_after("soon");
        assert_eq!(config.status_delay(1, &garbage), Duration::from_secs_f64(1.5));
    }

    #[test]
    fn test_huge_retry_after_is_capped() {
        let config = RetryConfig::default().without_jitter();
        let reply = HttpReply::new(503).with_retry_after("1e300");
        assert_eq!(config.status_delay(1, &reply), Duration::from_secs(300));

        let jittered = RetryConfig::default().status_delay(1, &reply).as_secs_f64();
        assert!((300.0..301.0).contains(&jittered));
    }

    #[test]
    fn test_network_delay_is_halved() {
        let config = RetryConfig::default().without_jitter();
        assert_eq!(config.network_delay(2), Duration::from_secs_f64(1.125));
    }

    #[test]
    fn test_jitter_stays_below_one_second() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let delay = config.status_delay(1, &HttpReply::new(500)).as_secs_f64();
            assert!((1.5..2.5).contains(&delay), "delay {} out of range", delay);
        }
    }

    #[test]
    fn test_validate_rejects_shrinking_base() {
        assert!(RetryConfig::new(5, 0.5).validate().is_err());
        assert!(RetryConfig::new(5, 1.5).validate().is_ok());
    }
}
