use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Line-list inputs and the CSV output path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub tokens_file: String,
    pub hashes_file: String,
    pub output_csv: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            tokens_file: "tokens.txt".to_string(),
            hashes_file: "hashes.txt".to_string(),
            output_csv: "results.csv".to_string(),
        }
    }
}

/// Randomized waits used between operations.
///
/// `delay_*` bounds the pause after every (account, content) pair,
/// `jitter_*` bounds the short gap between the two calls of one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_min_ms: 800,
            delay_max_ms: 1800,
            jitter_min_ms: 80,
            jitter_max_ms: 200,
        }
    }
}

impl PacingConfig {
    /// No waiting at all. Useful for dry local runs and tests.
    pub fn immediate() -> Self {
        Self {
            delay_min_ms: 0,
            delay_max_ms: 0,
            jitter_min_ms: 0,
            jitter_max_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("pacing.delay", self.delay_min_ms, self.delay_max_ms)?;
        check_range("pacing.jitter", self.jitter_min_ms, self.jitter_max_ms)
    }
}

fn check_range(field: &str, min: u64, max: u64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("min ({}ms) is greater than max ({}ms)", min, max),
        });
    }
    Ok(())
}
