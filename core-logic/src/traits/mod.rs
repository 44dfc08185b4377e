use crate::error::NetworkError;
use async_trait::async_trait;
use serde_json::Value;

/// What the retry policy needs to know about a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    /// Raw `Retry-After` header value, if the server sent one.
    pub retry_after: Option<String>,
}

impl HttpReply {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    /// `Retry-After` as seconds. Only the numeric form is understood;
    /// HTTP-date values, negatives and non-finite numbers yield `None`.
    pub fn retry_after_secs(&self) -> Option<f64> {
        let secs: f64 = self.retry_after.as_deref()?.trim().parse().ok()?;
        (secs.is_finite() && secs >= 0.0).then_some(secs)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201 | 204)
    }
}

/// A session able to PUT one JSON body. Implementations carry their own
/// auth headers and per-call timeout.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn put_json(&self, url: &str, payload: &Value) -> Result<HttpReply, NetworkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_numeric() {
        assert_eq!(HttpReply::new(429).with_retry_after("3").retry_after_secs(), Some(3.0));
        assert_eq!(
            HttpReply::new(503).with_retry_after(" 1.5 ").retry_after_secs(),
            Some(1.5)
        );
    }

    #[test]
    fn test_retry_after_rejects_unusable_values() {
        let date = HttpReply::new(429).with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(date.retry_after_secs(), None);
        assert_eq!(HttpReply::new(429).with_retry_after("-2").retry_after_secs(), None);
        assert_eq!(HttpReply::new(429).with_retry_after("NaN").retry_after_secs(), None);
        assert_eq!(HttpReply::new(429).retry_after_secs(), None);
    }

    #[test]
    fn test_acceptance_codes() {
        assert!(HttpReply::new(200).is_success());
        assert!(HttpReply::new(201).is_success());
        assert!(HttpReply::new(204).is_success());
        assert!(!HttpReply::new(202).is_success());
        assert!(!HttpReply::new(401).is_success());
    }
}
