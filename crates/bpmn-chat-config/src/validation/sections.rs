//! Per-section validators.

use crate::schema::BpmnChatConfig;

use super::helpers::{validate_not_blank, validate_range, validate_range_f64};

/// Validate `[gemini]`.
pub(crate) fn validate_gemini(errors: &mut Vec<String>, config: &BpmnChatConfig) {
    let gemini = &config.gemini;
    validate_not_blank(errors, "gemini.model", &gemini.model);
    validate_range(errors, "gemini.max_tokens", gemini.max_tokens, 1, 65536);
    validate_range_f64(errors, "gemini.temperature", gemini.temperature, 0.0, 2.0);

    if gemini.api_key_env.is_empty() {
        errors.push("gemini.api_key_env must list at least one variable".into());
    }
    for (i, var) in gemini.api_key_env.iter().enumerate() {
        if var.trim().is_empty() || var.contains('=') {
            errors.push(format!("gemini.api_key_env[{i}] = {var:?} is not a variable name"));
        }
    }
}

/// Validate `[output]`.
pub(crate) fn validate_output(errors: &mut Vec<String>, config: &BpmnChatConfig) {
    validate_not_blank(errors, "output.html_path", &config.output.html_path);
    if let Some(ref xml_path) = config.output.xml_path {
        validate_not_blank(errors, "output.xml_path", xml_path);
        if xml_path == &config.output.html_path {
            errors.push("output.xml_path must differ from output.html_path".into());
        }
    }
}
