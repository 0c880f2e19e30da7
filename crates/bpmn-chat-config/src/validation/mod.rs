//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::BpmnChatConfig;
use bpmn_chat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BpmnChatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_gemini(&mut errors, config);
    sections::validate_output(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
