//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# BPMN Chat Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[gemini]
model = "gemini-2.5-pro"
# First variable that is set (and non-empty) supplies the API key.
api_key_env = ["GEMINI_FREE_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"]
# max_tokens = 8192      # 1-65536
# temperature = 0.2      # 0.0-2.0

[chat]
# greeting = "Hello! Describe a business process and I'll draw it."

[output]
html_path = "bpmn-diagram.html"
# xml_path = "bpmn-diagram.bpmn"
# title = "BPMN Chatbot"

[logging]
level = "info"           # trace, debug, info, warn, error
"##
    .to_string()
}
