//! Session struct and conversation bookkeeping.

use bpmn_chat_common::SessionId;

use crate::{Message, TokenUsage};

/// One multi-turn conversation with the generation backend.
///
/// Every exchange is kept in `messages` and replayed on the next call, which
/// is how the backend sees earlier turns.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) id: SessionId,
    pub(super) model: String,
    pub(super) messages: Vec<Message>,
    pub(super) usage: TokenUsage,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            model: model.into(),
            messages: Vec::new(),
            usage: TokenUsage::default(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Completed request/reply exchanges, priming included.
    pub fn exchange_count(&self) -> usize {
        self.messages.len() / 2
    }

    /// Cumulative token usage reported by the backend.
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }
}
