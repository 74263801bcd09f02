//! Configuration module tests
//!
//! File-based catalog loading plus environment-backed settings

use krx_explorer::config::{KrxConfig, Settings};
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"{
            "api": {
                "baseUrl": "https://data-api.krx.co.kr",
                "key": "auth-key",
                "timeoutSecs": 10,
                "defaultFormat": "json"
            },
            "apis": {
                "stock": [
                    { "id": "sto_bydd_trd", "name": "Daily trade", "category": "stock" },
                    { "id": "ksq_bydd_trd", "name": "KOSDAQ daily trade", "category": "stock" }
                ],
                "index": [
                    { "id": "krx_dd_trd", "name": "KRX index daily", "category": "index" }
                ]
            }
        }"#,
    );

    let config = KrxConfig::load(file.path()).unwrap();
    assert_eq!(config.api.key, "auth-key");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.endpoint_count(), 3);
    assert_eq!(config.category_names(), vec!["index", "stock"]);
    assert_eq!(config.category("stock").unwrap().len(), 2);
}

#[test]
fn test_load_applies_api_defaults() {
    let file = write_config(
        r#"{
            "apis": {
                "stock": [
                    { "id": "sto_bydd_trd", "name": "Daily trade", "category": "stock" }
                ]
            }
        }"#,
    );

    let config = KrxConfig::load(file.path()).unwrap();
    assert_eq!(config.api.base_url, "https://data-api.krx.co.kr");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.default_format, "json");
    assert!(config.api.key.is_empty());
}

#[test]
fn test_load_rejects_missing_file() {
    let missing = std::path::Path::new("/nonexistent/krx-explorer.json");
    let error = KrxConfig::load(missing).unwrap_err();
    assert!(error.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_rejects_malformed_json() {
    let file = write_config("{ this is not json");
    let error = KrxConfig::load(file.path()).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config JSON"));
}

#[test]
fn test_load_rejects_empty_catalog() {
    let file = write_config(r#"{ "apis": {} }"#);
    assert!(KrxConfig::load(file.path()).is_err());
}

#[test]
fn test_load_rejects_duplicate_endpoint_ids() {
    let file = write_config(
        r#"{
            "apis": {
                "stock": [
                    { "id": "sto_bydd_trd", "name": "Daily trade", "category": "stock" }
                ],
                "index": [
                    { "id": "sto_bydd_trd", "name": "Same id again", "category": "index" }
                ]
            }
        }"#,
    );
    assert!(KrxConfig::load(file.path()).is_err());
}

#[test]
fn test_load_rejects_zero_timeout() {
    let file = write_config(
        r#"{
            "api": { "timeoutSecs": 0 },
            "apis": {
                "stock": [
                    { "id": "sto_bydd_trd", "name": "Daily trade", "category": "stock" }
                ]
            }
        }"#,
    );
    assert!(KrxConfig::load(file.path()).is_err());
}

#[test]
fn test_settings_from_environment() {
    std::env::set_var("SERVER_HOST", "127.0.0.1");
    std::env::set_var("SERVER_PORT", "8095");
    std::env::set_var("RUST_LOG", "debug");
    std::env::set_var("LOG_FORMAT", "text");

    let settings = Settings::new().unwrap();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8095);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.listen_addr(), "127.0.0.1:8095");
}
