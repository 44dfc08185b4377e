use anyhow::{Context, Result};
use config::{Config, File};
use core_logic::config::{InputFiles, PacingConfig};
use core_logic::{ConfigError, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const LIKE_URL: &str = "https://client.farcaster.xyz/v2/cast-likes";
pub const RECAST_URL: &str = "https://client.farcaster.xyz/v2/recasts";
pub const USER_AGENT: &str = "farcaster-bot/1.0";

/// Run settings. `Default` is the stock configuration; a TOML file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FarcasterConfig {
    pub files: InputFiles,
    pub like_url: String,
    pub recast_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub retry: RetryConfig,
    pub pacing: PacingConfig,
}

impl Default for FarcasterConfig {
    fn default() -> Self {
        Self {
            files: InputFiles::default(),
            like_url: LIKE_URL.to_string(),
            recast_url: RECAST_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout_secs: 15,
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl FarcasterConfig {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            }
            .into());
        }

        let settings = Config::builder()
            .add_source(File::with_name(path))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!(e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [("like_url", &self.like_url), ("recast_url", &self.recast_url)] {
            if url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                });
            }
            reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("'{}': {}", url, e),
            })?;
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        self.retry.validate()?;
        self.pacing.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
