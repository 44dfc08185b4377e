use crate::error::InputError;
use crate::utils::logger::PROGRESS_TARGET;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Loads a line-delimited list (one entry per line).
///
/// Lines are trimmed and blank lines dropped; order is preserved. A missing
/// file is reported and yields an empty list; the caller decides whether
/// that is fatal.
pub fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(target: PROGRESS_TARGET, "File not found: {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(InputError::Io {
                path: path.display().to_string(),
                msg: e.to_string(),
            })
        }
    };

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("Loaded {} entries from {}", lines.len(), path.display());
    Ok(lines)
}
