//! Tests for the show-config CLI command

use docfeed::cli::commands::config::{execute, ConfigArgs};
use docfeed::cli::OutputFormat;
use docfeed::core::config::{BackendKind, Config};

fn config_with_secret() -> Config {
    let mut config = Config::default();
    config.backend.algolia_app_id = Some("APPID".to_string());
    config.backend.algolia_api_key = Some("super-secret".to_string());
    config
}

#[test]
fn test_show_config_human() {
    let result = execute(ConfigArgs { toml: false }, &config_with_secret(), OutputFormat::Human);
    assert!(result.is_ok());
}

#[test]
fn test_show_config_json() {
    let result = execute(ConfigArgs { toml: false }, &config_with_secret(), OutputFormat::Json);
    assert!(result.is_ok());
}

#[test]
fn test_show_config_toml() {
    let mut config = config_with_secret();
    config.backend.kind = BackendKind::Local;

    let result = execute(ConfigArgs { toml: true }, &config, OutputFormat::Human);
    assert!(result.is_ok());
}

#[test]
fn test_redacted_json_hides_secret() {
    let json = serde_json::to_string(&config_with_secret().redacted()).unwrap();

    assert!(!json.contains("super-secret"));
    assert!(json.contains("APPID"));
}

#[test]
fn test_redacted_toml_round_trips() {
    let text = toml::to_string_pretty(&config_with_secret().redacted()).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();

    assert_eq!(parsed.indexing.batch_size, 1000);
    assert_eq!(parsed.backend.algolia_api_key.as_deref(), Some("***"));
}
