//! Tests for the configuration system.

use giotto_rate_limit::GiottoConfig;
use std::time::Duration;

#[test]
fn test_load_bundled_defaults() {
    let config = GiottoConfig::load().unwrap();

    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.base_delay_secs, 2);
    assert_eq!(config.retry.max_delay_secs, 60);

    assert_eq!(config.windows.per_minute, 5);
    assert_eq!(config.windows.per_hour, 100);

    assert_eq!(
        config.watsonx.base_url,
        "https://us-south.ml.cloud.ibm.com/ml/v1"
    );
    assert_eq!(
        config.watsonx.iam_url,
        "https://iam.cloud.ibm.com/identity/token"
    );
    assert_eq!(config.watsonx.version, "2021-05-01");
    assert_eq!(config.watsonx.token_safety_margin_secs, 300);

    assert_eq!(*config.cache.enabled(), true);
    assert_eq!(*config.cache.ttl_secs(), None);
}

#[test]
fn test_retry_config_builds_policy() {
    let config = GiottoConfig::default();
    let policy = config.retry.policy();

    assert_eq!(*policy.max_retries(), 5);
    assert_eq!(*policy.base_delay(), Duration::from_secs(2));
    assert_eq!(*policy.max_delay(), Duration::from_secs(60));
}

#[test]
fn test_safety_margin_as_duration() {
    let config = GiottoConfig::default();
    assert_eq!(
        config.watsonx.token_safety_margin(),
        Duration::from_secs(300)
    );
}

#[test]
fn test_config_from_file() {
    use std::io::Write;
    use tempfile::Builder;

    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[retry]
max_retries = 3
base_delay_secs = 1

[windows]
per_minute = 2

[cache]
enabled = false
"#
    )
    .unwrap();

    let config = GiottoConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.retry.base_delay_secs, 1);
    // Unspecified fields fall back to serde defaults.
    assert_eq!(config.retry.max_delay_secs, 60);
    assert_eq!(config.windows.per_minute, 2);
    assert_eq!(config.windows.per_hour, 100);
    assert_eq!(*config.cache.enabled(), false);
}

#[test]
fn test_config_from_missing_file_errors() {
    let result = GiottoConfig::from_file("/nonexistent/giotto.toml");
    assert!(result.is_err());
}
