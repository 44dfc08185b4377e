use crate::config::FarcasterConfig;
use core_logic::config::PacingConfig;
use core_logic::{pause, CallOutcome, CallReport, HttpTransport, RetryingExecutor};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Like,
    Recast,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Like => "like",
            Action::Recast => "recast",
        }
    }
}

/// Request body shared by both endpoints.
pub fn cast_payload(cast_hash: &str) -> Value {
    json!({ "castHash": cast_hash })
}

/// Both calls of one (account, cast) pair, reported independently.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub like: CallReport,
    pub recast: CallReport,
}

impl PairOutcome {
    /// Outcome for an account whose session could not be opened: neither
    /// call got a response.
    pub fn unreachable() -> Self {
        let report = CallReport {
            outcome: CallOutcome::Exhausted,
            attempts: 0,
            backoffs: Vec::new(),
        };
        Self {
            like: report.clone(),
            recast: report,
        }
    }

    pub fn any_exhausted(&self) -> bool {
        self.like.outcome.is_exhausted() || self.recast.outcome.is_exhausted()
    }
}

pub struct ActionRunner {
    executor: RetryingExecutor,
    like_url: String,
    recast_url: String,
    pacing: PacingConfig,
}

impl ActionRunner {
    pub fn from_config(config: &FarcasterConfig) -> Self {
        Self {
            executor: RetryingExecutor::new(config.retry.clone()),
            like_url: config.like_url.clone(),
            recast_url: config.recast_url.clone(),
            pacing: config.pacing.clone(),
        }
    }

    fn url(&self, action: Action) -> &str {
        match action {
            Action::Like => &self.like_url,
            Action::Recast => &self.recast_url,
        }
    }

    /// One idempotent PUT for `action` through the retry policy.
    pub async fn perform<T>(
        &self,
        session: &T,
        action: Action,
        cast_hash: &str,
        account: &str,
    ) -> CallReport
    where
        T: HttpTransport + ?Sized,
    {
        let label = format!("{} {}", account, action.label());
        self.executor
            .execute(
                session,
                self.url(action),
                &cast_payload(cast_hash),
                &label,
            )
            .await
    }

    /// Like, short jitter, then recast. A failed like never skips the recast.
    pub async fn like_and_recast<T>(&self, session: &T, cast_hash: &str, account: &str) -> PairOutcome
    where
        T: HttpTransport + ?Sized,
    {
        let like = self.perform(session, Action::Like, cast_hash, account).await;
        pause(self.pacing.jitter_min_ms, self.pacing.jitter_max_ms).await;
        let recast = self.perform(session, Action::Recast, cast_hash, account).await;

        PairOutcome { like, recast }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_logic::{HttpReply, NetworkError};
    use std::sync::Mutex;

    /// Answers by URL and remembers every request.
    struct RecordingSession {
        like_status: u16,
        recast_status: u16,
        requests: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl HttpTransport for RecordingSession {
        async fn put_json(&self, url: &str, payload: &Value) -> Result<HttpReply, NetworkError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), payload.clone()));
            let status = if url.ends_with("cast-likes") {
                self.like_status
            } else {
                self.recast_status
            };
            Ok(HttpReply::new(status))
        }
    }

    fn runner() -> ActionRunner {
        let config = FarcasterConfig {
            pacing: PacingConfig::immediate(),
            ..FarcasterConfig::default()
        };
        ActionRunner::from_config(&config)
    }

    #[test]
    fn test_payload_shape() {
        assert_eq!(cast_payload("0xabc"), json!({ "castHash": "0xabc" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_like_then_recast_same_payload() {
        let session = RecordingSession {
            like_status: 200,
            recast_status: 200,
            requests: Mutex::new(Vec::new()),
        };

        let outcome = runner().like_and_recast(&session, "0xabc", "token#1").await;

        assert_eq!(outcome.like.outcome.status(), Some(200));
        assert_eq!(outcome.recast.outcome.status(), Some(200));
        let requests = session.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "https://client.farcaster.xyz/v2/cast-likes");
        assert_eq!(requests[1].0, "https://client.farcaster.xyz/v2/recasts");
        assert_eq!(requests[0].1, requests[1].1);
    }

    #[test]
    fn test_unreachable_pair_has_no_responses() {
        let outcome = PairOutcome::unreachable();
        assert!(outcome.like.outcome.is_exhausted());
        assert!(outcome.recast.outcome.is_exhausted());
        assert_eq!(outcome.like.attempts, 0);
        assert!(outcome.any_exhausted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_like_still_recasts() {
        let session = RecordingSession {
            like_status: 400,
            recast_status: 201,
            requests: Mutex::new(Vec::new()),
        };

        let outcome = runner().like_and_recast(&session, "0xdef", "token#2").await;

        assert_eq!(outcome.like.outcome.status(), Some(400));
        assert_eq!(outcome.recast.outcome.status(), Some(201));
        assert!(!outcome.any_exhausted());
        assert_eq!(session.requests.lock().unwrap().len(), 2);
    }
}
