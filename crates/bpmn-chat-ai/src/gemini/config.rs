//! Gemini API client configuration.

use crate::AiError;

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-pro".to_string(),
            max_tokens: 8192,
            temperature: 0.2,
        }
    }

    /// Create config from the first of `vars` that is set to a non-empty value.
    pub fn from_env<S: AsRef<str>>(vars: &[S]) -> Result<Self, AiError> {
        Self::from_lookup(vars, |name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<S: AsRef<str>>(
        vars: &[S],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AiError> {
        for var in vars {
            if let Some(key) = lookup(var.as_ref()) {
                let key = key.trim();
                if !key.is_empty() {
                    tracing::debug!(var = var.as_ref(), "Gemini API key found");
                    return Ok(Self::new(key));
                }
            }
        }

        let names: Vec<&str> = vars.iter().map(|v| v.as_ref()).collect();
        Err(AiError::NotConfigured(format!(
            "Gemini API key not found. Set one of: {}",
            names.join(", ")
        )))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}
