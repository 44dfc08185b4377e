use crate::error::InputError;
use crate::utils::input::load_lines;
use std::fmt;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

const BEARER_PREFIX: &str = "Bearer ";
const PREVIEW_CHARS: usize = 12;

/// Returns an `Authorization` value for a raw token.
///
/// Values already carrying a `bearer ` prefix (any case) pass through as-is.
pub fn normalize_token(raw: &str) -> String {
    let has_prefix = raw
        .get(..BEARER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX));
    if has_prefix {
        raw.to_string()
    } else {
        format!("{}{}", BEARER_PREFIX, raw)
    }
}

/// First 12 characters plus `...`; empty input stays empty.
pub fn token_preview(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let head: String = token.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// A normalized account token. Zeroed on drop, redacted in `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    authorization: String,
}

impl Credential {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            authorization: normalize_token(raw),
        }
    }

    /// Full header value, e.g. `Bearer abc...`.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn preview(&self) -> String {
        token_preview(&self.authorization)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("preview", &self.preview())
            .field("authorization", &"***REDACTED***")
            .finish()
    }
}

/// Loads and normalizes one credential per non-blank line.
pub fn load_credentials(path: impl AsRef<Path>) -> Result<Vec<Credential>, InputError> {
    let mut lines = load_lines(path)?;
    let credentials = lines.iter().map(|line| Credential::from_raw(line)).collect();
    lines.zeroize();
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_bare_token() {
        assert_eq!(normalize_token("abc123"), "Bearer abc123");
    }

    #[test]
    fn test_normalize_keeps_existing_prefix_any_case() {
        assert_eq!(normalize_token("Bearer abc"), "Bearer abc");
        assert_eq!(normalize_token("bearer abc"), "bearer abc");
        assert_eq!(normalize_token("BEARER abc"), "BEARER abc");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_token("MK-xyz");
        assert_eq!(normalize_token(&once), once);
    }

    #[test]
    fn test_normalize_prefix_needs_space() {
        assert_eq!(normalize_token("Bearerabc"), "Bearer Bearerabc");
    }

    #[test]
    fn test_normalize_multibyte_does_not_panic() {
        assert_eq!(normalize_token("ñandú"), "Bearer ñandú");
    }

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("Bearer abcdefghijk"), "Bearer abcde...");
        assert_eq!(token_preview("short"), "short...");
        assert_eq!(token_preview(""), "");
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::from_raw("supersecretvalue");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("supersecretvalue"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_load_credentials_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first\n\nBearer second\n").unwrap();

        let credentials = load_credentials(file.path()).unwrap();
        let values: Vec<&str> = credentials.iter().map(|c| c.authorization()).collect();
        assert_eq!(values, vec!["Bearer first", "Bearer second"]);
    }
}
