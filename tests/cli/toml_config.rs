//! Configuration file loading tests

use scansync::app::cli::config::FileConfig;

#[test]
fn test_full_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scansync.toml");
    std::fs::write(
        &path,
        r#"
[server]
base_url = "https://hub.example.com"
api_token = "file-token"
timeout_secs = 30
verify_tls = false

[upload]
retry_attempts = 6
retry_delay_secs = 2

[log]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = FileConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.base_url, "https://hub.example.com");
    assert_eq!(config.server.api_token, "file-token");
    assert!(!config.server.verify_tls);
    assert_eq!(config.upload.retry_attempts, 6);
    assert_eq!(config.upload.retry_delay_secs, 2);
    assert_eq!(config.log.level.as_deref(), Some("debug"));
    assert_eq!(config.log.format.as_deref(), Some("json"));
    assert!(config.log.file.is_none());
    assert!(config.server.validate().is_ok());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scansync.toml");
    std::fs::write(&path, "[server]\nbase_url = \"https://hub.example.com\"\n").unwrap();

    let config = FileConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.timeout_secs, 60);
    assert!(config.server.verify_tls);
    assert_eq!(config.upload.retry_attempts, 4);
    assert_eq!(config.upload.retry_delay_secs, 1);
    // no token anywhere means the session cannot open
    assert!(config.server.validate().is_err());
}

#[test]
fn test_no_config_file_yields_defaults() {
    // None plus a (presumably) absent default path: loader must not fail
    let config = FileConfig::load(None).unwrap_or_default();
    assert_eq!(config.upload.retry_attempts, 4);
}

#[test]
fn test_unknown_keys_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scansync.toml");
    std::fs::write(
        &path,
        "[server]\nbase_url = \"https://hub.example.com\"\n\n[future_section]\nx = 1\n",
    )
    .unwrap();

    let config = FileConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.base_url, "https://hub.example.com");
}
