//! Conversation session management.
//!
//! A `Session` holds the message history of one backend conversation.
//! `SessionState` records whether a conversation has started yet.

mod chat;
mod manager;
mod state;

pub use manager::Session;
pub use state::SessionState;
