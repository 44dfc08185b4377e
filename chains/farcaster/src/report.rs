//! CSV audit log: one row per (account, cast) pair, flushed as written.

use crate::actions::PairOutcome;
use anyhow::{anyhow, Context, Result};
use core_logic::CallOutcome;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const NO_RESPONSE: &str = "no-response";
pub const FAILED_RETRIES: &str = "failed_retries";

pub const HEADER: [&str; 6] = [
    "token_index",
    "token_preview",
    "cast_hash",
    "like_status",
    "recast_status",
    "note",
];

/// Numeric status, or `no-response` when retries ran out.
pub fn display_status(outcome: &CallOutcome) -> String {
    match outcome.status() {
        Some(status) => status.to_string(),
        None => NO_RESPONSE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    /// 1-based position of the account in the token file.
    pub token_index: usize,
    pub token_preview: String,
    pub cast_hash: String,
    pub like_status: String,
    pub recast_status: String,
    pub note: String,
}

impl OperationResult {
    pub fn new(token_index: usize, token_preview: &str, cast_hash: &str, pair: &PairOutcome) -> Self {
        let note = if pair.any_exhausted() {
            FAILED_RETRIES.to_string()
        } else {
            String::new()
        };

        Self {
            token_index,
            token_preview: token_preview.to_string(),
            cast_hash: cast_hash.to_string(),
            like_status: display_status(&pair.like.outcome),
            recast_status: display_status(&pair.recast.outcome),
            note,
        }
    }
}

pub struct ResultLog<W: Write> {
    writer: csv::Writer<W>,
}

impl ResultLog<File> {
    /// Truncates `path` and writes the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Self::from_writer(file)
    }
}

impl<W: Write> ResultLog<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(HEADER).context("Failed to write CSV header")?;
        writer.flush().context("Failed to flush CSV header")?;
        Ok(Self { writer })
    }

    /// Appends one row and flushes it through to the underlying writer.
    pub fn append(&mut self, row: &OperationResult) -> Result<()> {
        self.writer
            .serialize(row)
            .context("Failed to write CSV row")?;
        self.writer.flush().context("Failed to flush CSV row")?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to finish CSV log: {}", e.error()))
    }
}
