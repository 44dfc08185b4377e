//! Sequential account × cast matrix.
//!
//! Accounts run in token-file order and, for each account, casts in
//! hash-file order. Every pair produces exactly one CSV row, whatever the
//! outcome of its two calls. An account whose session cannot be opened
//! still gets its rows, recorded as `no-response`. Only missing inputs or an
//! unwritable output file stop a run.

use crate::actions::{ActionRunner, PairOutcome};
use crate::config::FarcasterConfig;
use crate::report::{OperationResult, ResultLog};
use anyhow::Result;
use core_logic::{
    load_credentials, load_lines, pause, Credential, HttpTransport, InputError, MetricsCollector,
    MetricsSnapshot, PROGRESS_TARGET,
};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub accounts: usize,
    pub cast_hashes: usize,
    pub output_csv: String,
    pub metrics: MetricsSnapshot,
}

impl RunSummary {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Runs the whole matrix. `connect` builds the session for one account and
/// is only called once both input lists are known to be non-empty. A failed
/// `connect` is logged and that account's pairs are written as
/// `no-response` without touching the network.
pub async fn run<F, T>(config: &FarcasterConfig, connect: F) -> Result<RunSummary>
where
    F: Fn(&Credential) -> Result<T>,
    T: HttpTransport,
{
    let files = &config.files;

    let credentials = load_credentials(&files.tokens_file)?;
    if credentials.is_empty() {
        error!(
            target: PROGRESS_TARGET,
            "No tokens. Make sure {} has one token per line.", files.tokens_file
        );
        return Err(InputError::Empty {
            path: files.tokens_file.clone(),
        }
        .into());
    }

    let cast_hashes = load_lines(&files.hashes_file)?;
    if cast_hashes.is_empty() {
        error!(
            target: PROGRESS_TARGET,
            "No cast hashes. Make sure {} has one hash per line.", files.hashes_file
        );
        return Err(InputError::Empty {
            path: files.hashes_file.clone(),
        }
        .into());
    }

    let sessions: Vec<Option<T>> = credentials
        .iter()
        .enumerate()
        .map(|(i, credential)| match connect(credential) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(
                    target: PROGRESS_TARGET,
                    "Failed to open session for account #{} ({}): {:#}. Its casts will be recorded as no-response.",
                    i + 1,
                    credential.preview(),
                    e
                );
                None
            }
        })
        .collect();

    let mut log = ResultLog::create(&files.output_csv)?;
    let actions = ActionRunner::from_config(config);
    let metrics = MetricsCollector::default();

    let total_ops = sessions.len() * cast_hashes.len();
    info!(
        target: PROGRESS_TARGET,
        "{} accounts x {} hashes = {} operations (like+recast per pair).",
        sessions.len(),
        cast_hashes.len(),
        total_ops
    );

    let mut op_count = 0usize;
    for (i, (credential, session)) in credentials.iter().zip(&sessions).enumerate() {
        let token_index = i + 1;
        let preview = credential.preview();
        let account = format!("token#{}", token_index);
        info!(
            target: PROGRESS_TARGET,
            "=== Using account #{} ({}) ===", token_index, preview
        );

        for cast_hash in &cast_hashes {
            op_count += 1;
            let started = Instant::now();

            let pair = match session {
                Some(session) => actions.like_and_recast(session, cast_hash, &account).await,
                None => PairOutcome::unreachable(),
            };
            metrics.record_call(&pair.like.outcome);
            metrics.record_call(&pair.recast.outcome);

            let row = OperationResult::new(token_index, &preview, cast_hash, &pair);
            info!(
                target: PROGRESS_TARGET,
                "[{}/{}] {} -> hash {} LIKE {} | RECAST {}",
                op_count,
                total_ops,
                account,
                cast_hash,
                row.like_status,
                row.recast_status
            );
            log.append(&row)?;
            metrics.record_operation(started.elapsed());

            if session.is_some() {
                pause(config.pacing.delay_min_ms, config.pacing.delay_max_ms).await;
            }
        }
    }

    let snapshot = metrics.snapshot();
    info!(
        target: PROGRESS_TARGET,
        "Done. Results saved to {}", files.output_csv
    );
    info!(
        target: PROGRESS_TARGET,
        "Total Time: {:.1}s | Operations: {} | Calls OK: {} | 401: {} | Rejected: {} | No response: {} | Success Rate: {:.2}%",
        metrics.uptime().as_secs_f64(),
        snapshot.operations,
        snapshot.calls.success,
        snapshot.calls.unauthorized,
        snapshot.calls.rejected,
        snapshot.calls.no_response,
        snapshot.calls.success_rate
    );

    Ok(RunSummary {
        accounts: sessions.len(),
        cast_hashes: cast_hashes.len(),
        output_csv: files.output_csv.clone(),
        metrics: snapshot,
    })
}
