//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod credentials;
pub(crate) mod input;
pub(crate) mod logger;
pub(crate) mod pacing;
pub(crate) mod retry;

pub use credentials::{load_credentials, normalize_token, token_preview, Credential};
pub use input::load_lines;
pub use logger::{colorize, setup_logger, PROGRESS_TARGET};
pub use pacing::{pause, random_delay};
