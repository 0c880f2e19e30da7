//! Generation backend settings.

use serde::{Deserialize, Serialize};

/// Environment variables searched for the API key, in order.
pub const DEFAULT_API_KEY_VARS: &[&str] = &["GEMINI_FREE_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// `[gemini]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    pub model: String,
    /// Candidate environment variable names for the API key.
    pub api_key_env: Vec<String>,
    /// Output token limit (valid range: 1-65536).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".into(),
            api_key_env: DEFAULT_API_KEY_VARS.iter().map(|v| v.to_string()).collect(),
            max_tokens: 8192,
            temperature: 0.2,
        }
    }
}
