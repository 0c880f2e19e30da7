//! Diagram generation engine.
//!
//! Provides:
//! - A Gemini API client behind the `AiClient` trait
//! - Multi-turn `Session`s over any `AiClient`
//! - The turn handler that primes new sessions and embeds the current
//!   diagram into follow-up requests
//! - A defensive decoder that turns free-text replies into a BPMN document
//!   plus overlay annotations

pub mod decoder;
pub mod gemini;
pub mod prompts;
pub mod session;
pub mod transcript;
pub mod turn;

use async_trait::async_trait;

pub use decoder::{decode, Annotation, DecodeError, DecodedReply, DiagramDocument, OverlayPosition};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompts::PromptSet;
pub use session::{Session, SessionState};
pub use transcript::{ConversationLog, TurnRecord};
pub use turn::{TurnError, TurnHandler, TurnOutcome};

/// A generation backend: takes the full conversation, returns the next reply.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
}
