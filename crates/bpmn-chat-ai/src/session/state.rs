//! Whether a conversation has a live backend session.

use super::manager::Session;

/// Session bookkeeping for one conversation.
///
/// Starts as `NotStarted`; the first successful turn moves it to `Active`,
/// and it stays there until the caller resets it.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Active(Session),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::NotStarted => None,
        }
    }

    /// Drop the session so the next turn starts a fresh conversation.
    pub fn reset(&mut self) -> Option<Session> {
        match std::mem::take(self) {
            SessionState::Active(session) => Some(session),
            SessionState::NotStarted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        let state = SessionState::default();
        assert!(!state.is_active());
        assert!(state.session().is_none());
    }

    #[test]
    fn reset_returns_previous_session() {
        let session = Session::new("gemini-test");
        let id = session.id().clone();
        let mut state = SessionState::Active(session);
        assert!(state.is_active());

        let dropped = state.reset().unwrap();
        assert_eq!(dropped.id(), &id);
        assert!(!state.is_active());
        assert!(state.reset().is_none());
    }
}
