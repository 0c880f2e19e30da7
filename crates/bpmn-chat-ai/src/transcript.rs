//! The chat transcript shown to the user.

use serde::{Deserialize, Serialize};

/// One user message and the reply shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub user: String,
    /// `None` while the turn is being answered.
    pub reply: Option<String>,
}

/// Append-only list of turns. Only the last record's reply is ever written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    records: Vec<TurnRecord>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new turn awaiting its reply.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.records.push(TurnRecord {
            user: text.into(),
            reply: None,
        });
    }

    /// Text of the last turn if it has not been answered yet.
    pub fn pending_user_text(&self) -> Option<&str> {
        self.records
            .last()
            .filter(|r| r.reply.is_none())
            .map(|r| r.user.as_str())
    }

    /// Set the last turn's reply. Returns `false` if the log is empty.
    pub fn set_last_reply(&mut self, reply: impl Into<String>) -> bool {
        match self.records.last_mut() {
            Some(record) => {
                record.reply = Some(reply.into());
                true
            }
            None => false,
        }
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.records.last()
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.records.last().and_then(|r| r.reply.as_deref())
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
