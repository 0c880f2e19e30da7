//! Async send for Session.

use tracing::debug;

use crate::{AiClient, AiError, Message};

use super::manager::Session;

impl Session {
    /// Send one user message and return the backend's reply text.
    ///
    /// On failure the history is left exactly as it was before the call, so
    /// the same message can be resent later.
    pub async fn send(
        &mut self,
        client: &dyn AiClient,
        text: impl Into<String>,
    ) -> Result<String, AiError> {
        self.messages.push(Message::user(text));

        match client.send_message(&self.messages).await {
            Ok(response) => {
                self.usage.add(&response.usage);
                debug!(
                    session = self.id.short(),
                    reply_chars = response.content.len(),
                    history = self.messages.len() + 1,
                    "session reply"
                );
                self.messages.push(Message::assistant(response.content.clone()));
                Ok(response.content)
            }
            Err(e) => {
                self.messages.pop();
                debug!(session = self.id.short(), error = %e, "session send failed");
                Err(e)
            }
        }
    }
}
