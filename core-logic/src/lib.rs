//! # Core Logic - Shared Utilities for Multi-Account Runners
//!
//! This crate provides the pieces every account runner needs: line-list
//! inputs, credential handling, a retrying HTTP executor, pacing and logging.
//!
//! ## Modules
//!
//! - [`config`] - Serializable input/pacing settings
//! - [`error`] - Typed error handling with thiserror
//! - [`metrics`] - Per-run call and timing counters
//! - [`traits`] - HTTP transport abstraction
//! - `utils` - Credentials, input loading, pacing, retry, logger

pub mod config;
pub mod error;
pub mod metrics;
pub mod traits;
pub(crate) mod utils;

pub use config::{InputFiles, PacingConfig};
pub use error::{ConfigError, InputError, NetworkError};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use traits::{HttpReply, HttpTransport};

pub use utils::{
    colorize, load_credentials, load_lines, normalize_token, pause, random_delay, setup_logger,
    token_preview, Credential, PROGRESS_TARGET,
};

pub use utils::retry::{
    classify_status, CallOutcome, CallReport, RetryConfig, RetryingExecutor, StatusClass,
    MAX_RETRY_AFTER_SECS,
};
