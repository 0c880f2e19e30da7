//! BPMN Chat configuration.
//!
//! TOML-based configuration with serde defaults for every section, so a
//! partial (or empty) config file works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bpmn_chat_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("model: {}", config.gemini.model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BpmnChatConfig, CONFIG_SCHEMA_VERSION};

use bpmn_chat_common::ConfigError;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "BPMN_CHAT_CONFIG";

/// Load config from `BPMN_CHAT_CONFIG` if set, else from the platform
/// default path (creating a documented default file on first run).
///
/// Values that fail validation are an error, not a warning.
pub fn load_config() -> Result<BpmnChatConfig, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!("using config override from {CONFIG_PATH_ENV}: {path}");
            toml_loader::load_from_path(std::path::Path::new(path.trim()))
        }
        _ => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BpmnChatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
