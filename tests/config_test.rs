//! Tests for server configuration loading.

use std::io::Write;
use strictly_connect_four::ServerConfig;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8901);
    assert_eq!(config.address(), "127.0.0.1:8901");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "host = \"0.0.0.0\"\nport = 9000").expect("Failed to write config");

    let config = ServerConfig::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config, ServerConfig::new("0.0.0.0".to_string(), 9000));
}

#[test]
fn test_missing_fields_use_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "port = 7000").expect("Failed to write config");

    let config = ServerConfig::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.address(), "127.0.0.1:7000");
}

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = ServerConfig::load(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "port = \"not a number\"").expect("Failed to write config");

    let err = ServerConfig::from_file(file.path()).expect_err("Should fail to parse");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_overrides_replace_file_values() {
    let config = ServerConfig::default().with_overrides(Some("localhost".to_string()), None);
    assert_eq!(config.address(), "localhost:8901");

    let config = config.with_overrides(None, Some(1234));
    assert_eq!(config.address(), "localhost:1234");
}
