//! Turn handling: one user message in, one diagram out.
//!
//! The first turn of a conversation opens a backend session and primes it
//! with the instructions; later turns reuse that session and embed the
//! diagram currently on screen. Every failure is recovered here and turned
//! into a transcript message.

#[cfg(test)]
mod tests;

use tracing::{debug, info, warn};

use crate::decoder::{self, Annotation, DiagramDocument};
use crate::prompts::PromptSet;
use crate::session::{Session, SessionState};
use crate::transcript::ConversationLog;
use crate::{AiClient, AiError};

/// Reply shown when no API key was found at startup.
pub const CONFIG_ERROR_REPLY: &str =
    "Google Gemini API key not found. Add GEMINI_FREE_API_KEY (or GEMINI_API_KEY) to .env.";

/// Reply shown after every successful turn, in place of the raw model output.
pub const ACK_REPLY: &str = "Here is the updated BPMN diagram based on your request:";

/// Prefix of the reply shown when the backend call fails.
pub const BACKEND_ERROR_PREFIX: &str = "Gemini API error: ";

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("conversation log has no unanswered turn")]
    NoPendingTurn,
}

/// What the diagram view should show after a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub document: DiagramDocument,
    pub annotations: Vec<Annotation>,
}

/// Drives turns against an optional backend.
///
/// `client` is `None` when no credentials were configured; the handler then
/// answers every turn with [`CONFIG_ERROR_REPLY`] without any network call.
pub struct TurnHandler {
    client: Option<Box<dyn AiClient>>,
    model: String,
    prompts: PromptSet,
}

impl TurnHandler {
    pub fn new(client: Option<Box<dyn AiClient>>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            prompts: PromptSet::default(),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn backend_available(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Append `user_text` to the log and answer it.
    pub async fn submit(
        &self,
        log: &mut ConversationLog,
        state: &mut SessionState,
        current: &DiagramDocument,
        user_text: impl Into<String>,
    ) -> Result<TurnOutcome, TurnError> {
        log.push_user(user_text);
        self.handle_turn(log, state, current).await
    }

    /// Answer the last, unanswered turn in `log`.
    ///
    /// Writes the reply into the log and updates `state` in place. A failed
    /// backend call leaves `state` exactly as it was and returns `current`
    /// unchanged, so the user can simply retry.
    pub async fn handle_turn(
        &self,
        log: &mut ConversationLog,
        state: &mut SessionState,
        current: &DiagramDocument,
    ) -> Result<TurnOutcome, TurnError> {
        let user_text = log
            .pending_user_text()
            .ok_or(TurnError::NoPendingTurn)?
            .to_string();

        let Some(client) = self.client.as_deref() else {
            warn!("turn rejected: no Gemini credentials configured");
            log.set_last_reply(CONFIG_ERROR_REPLY);
            *state = SessionState::NotStarted;
            return Ok(TurnOutcome {
                document: DiagramDocument::placeholder(),
                annotations: Vec::new(),
            });
        };

        let result = match state {
            SessionState::Active(session) => {
                debug!(session = session.id().short(), "follow-up turn");
                let message = self.prompts.followup_message(current.as_str(), &user_text);
                session.send(client, message).await
            }
            SessionState::NotStarted => match self.start_session(client, &user_text).await {
                Ok((session, reply)) => {
                    *state = SessionState::Active(session);
                    Ok(reply)
                }
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(raw) => {
                let decoded = decoder::decode(&raw);
                log.set_last_reply(ACK_REPLY);
                Ok(TurnOutcome {
                    document: decoded.document,
                    annotations: decoded.annotations,
                })
            }
            Err(e) => {
                warn!(error = %e, "backend call failed, keeping previous diagram");
                log.set_last_reply(format!("{BACKEND_ERROR_PREFIX}{e}"));
                Ok(TurnOutcome {
                    document: current.clone(),
                    annotations: Vec::new(),
                })
            }
        }
    }

    /// Open a session, prime it with the instructions, then send the
    /// first request. Nothing is kept if any step fails.
    async fn start_session(
        &self,
        client: &dyn AiClient,
        user_text: &str,
    ) -> Result<(Session, String), AiError> {
        let mut session = Session::new(&self.model);
        info!(session = session.id().short(), model = %self.model, "starting new session");

        let priming = session.send(client, self.prompts.instructions.as_str()).await?;
        debug!(reply_chars = priming.len(), "session primed");

        let reply = session
            .send(client, self.prompts.first_turn_message(user_text))
            .await?;
        Ok((session, reply))
    }
}
