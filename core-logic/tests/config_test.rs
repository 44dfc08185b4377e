use core_logic::config::{InputFiles, PacingConfig};
use core_logic::{ConfigError, RetryConfig};

#[test]
fn test_pacing_defaults() {
    let pacing = PacingConfig::default();
    assert_eq!(pacing.delay_min_ms, 800);
    assert_eq!(pacing.delay_max_ms, 1800);
    assert_eq!(pacing.jitter_min_ms, 80);
    assert_eq!(pacing.jitter_max_ms, 200);
    assert!(pacing.validate().is_ok());
}

#[test]
fn test_pacing_inverted_range_is_rejected() {
    let pacing = PacingConfig {
        delay_min_ms: 2000,
        ..PacingConfig::default()
    };

    match pacing.validate() {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "pacing.delay"),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_partial_pacing_keeps_defaults() {
    let pacing: PacingConfig = serde_json::from_str(r#"{ "delay_max_ms": 2500 }"#).unwrap();
    assert_eq!(pacing.delay_min_ms, 800);
    assert_eq!(pacing.delay_max_ms, 2500);
}

#[test]
fn test_input_file_defaults() {
    let files = InputFiles::default();
    assert_eq!(files.tokens_file, "tokens.txt");
    assert_eq!(files.hashes_file, "hashes.txt");
    assert_eq!(files.output_csv, "results.csv");
}

#[test]
fn test_retry_defaults() {
    let retry = RetryConfig::default();
    assert_eq!(retry.max_retries, 5);
    assert!((retry.exponential_base - 1.5).abs() < f64::EPSILON);
    assert!(retry.jitter);
}

#[test]
fn test_partial_retry_keeps_defaults() {
    let retry: RetryConfig = serde_json::from_str(r#"{ "max_retries": 2 }"#).unwrap();
    assert_eq!(retry.max_retries, 2);
    assert!((retry.network_factor - 0.5).abs() < f64::EPSILON);
}
