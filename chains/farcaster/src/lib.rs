pub mod actions;
pub mod client;
pub mod config;
pub mod report;
pub mod runner;

pub use actions::{cast_payload, Action, ActionRunner, PairOutcome};
pub use client::FarcasterSession;
pub use config::FarcasterConfig;
pub use report::{display_status, OperationResult, ResultLog};
pub use runner::{run, RunSummary};
