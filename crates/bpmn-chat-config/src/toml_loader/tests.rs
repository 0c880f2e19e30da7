//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_bpmn_chat_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, bpmn_chat_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[gemini]
model = "gemini-2.5-flash"
api_key_env = ["MY_KEY"]

[output]
xml_path = "out.bpmn"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert_eq!(config.gemini.api_key_env, vec!["MY_KEY".to_string()]);
    assert_eq!(config.output.xml_path.as_deref(), Some("out.bpmn"));
    // Defaults preserved
    assert_eq!(config.output.html_path, "bpmn-diagram.html");
    assert_eq!(config.gemini.max_tokens, 8192);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, bpmn_chat_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[gemini]
temperature = 5.0
"#,
    )
    .unwrap();

    let err = load_from_path(&path).unwrap_err();
    match err {
        bpmn_chat_common::ConfigError::ValidationError(msg) => {
            assert!(msg.contains("temperature"), "unexpected message: {msg}");
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bpmn-chat").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.gemini.model, "gemini-2.5-pro");
    assert_eq!(config.gemini.api_key_env.len(), 3);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::BpmnChatConfig;

    let config: BpmnChatConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    // Not every CI environment has a config dir.
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("bpmn-chat"));
        assert!(path_str.ends_with("config.toml"));
    }
}
