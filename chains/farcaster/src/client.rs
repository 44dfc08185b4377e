//! Authenticated HTTP session for one Farcaster account.
//!
//! Every request carries the account's bearer token, a JSON content type
//! and the fixed client user agent. Each call has its own timeout; a timed
//! out call surfaces as a [`NetworkError`] and is retried by the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{Credential, HttpReply, HttpTransport, NetworkError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;

pub struct FarcasterSession {
    client: Client,
    timeout: Duration,
}

impl FarcasterSession {
    pub fn new(credential: &Credential, user_agent: &str, timeout: Duration) -> Result<Self> {
        Self::from_builder(Client::builder(), credential, user_agent, timeout)
    }

    /// Like [`FarcasterSession::new`] but starting from a caller-supplied
    /// builder, e.g. one with proxy settings already applied.
    pub fn from_builder(
        builder: ClientBuilder,
        credential: &Credential,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(credential.authorization())
            .with_context(|| format!("Token {} is not a valid header value", credential.preview()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = builder
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, url: &str, e: reqwest::Error) -> NetworkError {
        if e.is_timeout() {
            NetworkError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
                endpoint: url.to_string(),
            }
        } else if e.is_builder() {
            NetworkError::InvalidRequest {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for FarcasterSession {
    async fn put_json(&self, url: &str, payload: &Value) -> Result<HttpReply, NetworkError> {
        let response = self
            .client
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_error(url, e))?;

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(HttpReply {
            status: response.status().as_u16(),
            retry_after,
        })
    }
}
