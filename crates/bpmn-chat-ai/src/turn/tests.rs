//! Turn handling against a scripted backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::*;
use crate::decoder::{OverlayPosition, XML_DECLARATION};
use crate::prompts::{FIRST_TURN_REMINDER, INSTRUCTIONS};
use crate::{AiResponse, Message, TokenUsage};

const ORDER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL" id="Definitions_1">
  <bpmn:process id="Process_1"><bpmn:task id="Task_1" name="Take Order"/></bpmn:process>
</bpmn:definitions>"#;

/// Backend double: pops scripted replies and records every request.
#[derive(Clone, Default)]
struct FakeBackend {
    replies: Arc<Mutex<Vec<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl FakeBackend {
    fn scripted(replies: Vec<Result<&str, &str>>) -> Self {
        let mut replies: Vec<Result<String, String>> = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        replies.reverse();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    fn last_sent(&self) -> String {
        let requests = self.requests();
        requests.last().unwrap().last().unwrap().content.clone()
    }
}

#[async_trait]
impl AiClient for FakeBackend {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop() {
            Some(Ok(content)) => Ok(AiResponse {
                content,
                usage: TokenUsage::default(),
            }),
            Some(Err(msg)) => Err(AiError::NetworkError(msg)),
            None => Err(AiError::ApiError("no scripted reply".into())),
        }
    }
}

fn handler(backend: &FakeBackend) -> TurnHandler {
    TurnHandler::new(Some(Box::new(backend.clone())), "gemini-test")
}

#[tokio::test]
async fn missing_credentials_short_circuit() {
    let handler = TurnHandler::new(None, "gemini-test");
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let outcome = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "add a task")
        .await
        .unwrap();

    assert!(!handler.backend_available());
    assert_eq!(log.last_reply(), Some(CONFIG_ERROR_REPLY));
    assert!(outcome.document.is_placeholder());
    assert!(outcome.annotations.is_empty());
    assert!(!state.is_active());
}

#[tokio::test]
async fn first_turn_primes_then_sends_request() {
    let backend = FakeBackend::scripted(vec![Ok("Understood."), Ok(ORDER_XML)]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let outcome = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "take pizza orders")
        .await
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].len(), 1);
    assert_eq!(requests[0][0].content, INSTRUCTIONS);
    assert_eq!(requests[1].len(), 3);
    assert_eq!(
        requests[1][2].content,
        format!("take pizza orders\n\n{FIRST_TURN_REMINDER}")
    );

    assert_eq!(outcome.document.as_str(), ORDER_XML);
    assert!(outcome.annotations.is_empty());
    assert_eq!(log.last_reply(), Some(ACK_REPLY));
    assert_eq!(log.len(), 1);
    assert_eq!(state.session().unwrap().exchange_count(), 2);
}

#[tokio::test]
async fn first_turn_unfenced_xml_without_declaration() {
    let bare = ORDER_XML.split_once('\n').unwrap().1;
    let backend = FakeBackend::scripted(vec![Ok("ok"), Ok(bare)]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let outcome = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();

    assert_eq!(outcome.document.as_str(), format!("{XML_DECLARATION}\n{bare}"));
    assert!(outcome.annotations.is_empty());
}

#[tokio::test]
async fn follow_up_reuses_session_and_embeds_current_diagram() {
    let reply = format!(
        "```xml\n{ORDER_XML}\n```\n```json\n[{{\"id\":\"Gateway_1\",\"text\":\"check path\"}}]\n```"
    );
    let backend = FakeBackend::scripted(vec![Ok("ok"), Ok(ORDER_XML), Ok(reply.as_str())]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let first = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();
    let session_id = state.session().unwrap().id().clone();

    let second = handler
        .submit(&mut log, &mut state, &first.document, "review the gateway")
        .await
        .unwrap();

    let sent = backend.last_sent();
    assert!(sent.contains(&format!("```xml\n{ORDER_XML}\n```")));
    assert!(sent.contains("USER REQUEST:\nreview the gateway"));
    assert!(!sent.contains(INSTRUCTIONS));
    assert_eq!(backend.requests()[2].len(), 5);

    assert_eq!(state.session().unwrap().id(), &session_id);
    assert_eq!(second.annotations.len(), 1);
    assert_eq!(second.annotations[0].id, "Gateway_1");
    assert_eq!(second.annotations[0].marker_class, None);
    assert_eq!(second.annotations[0].position, OverlayPosition::default());
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn follow_up_failure_preserves_diagram_and_session() {
    let backend = FakeBackend::scripted(vec![Ok("ok"), Ok(ORDER_XML), Err("quota exceeded")]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let first = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();
    let before = state.session().unwrap().clone();

    let outcome = handler
        .submit(&mut log, &mut state, &first.document, "add payment")
        .await
        .unwrap();

    assert_eq!(outcome.document, first.document);
    assert!(outcome.annotations.is_empty());
    let reply = log.last_reply().unwrap();
    assert!(reply.starts_with(BACKEND_ERROR_PREFIX));
    assert!(reply.contains("quota exceeded"));

    let after = state.session().unwrap();
    assert_eq!(after.id(), before.id());
    assert_eq!(after.messages(), before.messages());
}

#[tokio::test]
async fn first_turn_failure_leaves_conversation_unstarted() {
    let backend = FakeBackend::scripted(vec![Ok("ok"), Err("connection reset")]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;
    let current = DiagramDocument::placeholder();

    let outcome = handler
        .submit(&mut log, &mut state, &current, "orders")
        .await
        .unwrap();

    assert!(!state.is_active());
    assert_eq!(outcome.document, current);
    assert!(log.last_reply().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn priming_failure_is_reported() {
    let backend = FakeBackend::scripted(vec![Err("dns failure")]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();

    assert_eq!(backend.requests().len(), 1);
    assert!(!state.is_active());
    assert!(log.last_reply().unwrap().contains("dns failure"));
}

#[tokio::test]
async fn retry_after_failure_continues_same_session() {
    let backend = FakeBackend::scripted(vec![
        Ok("ok"),
        Ok(ORDER_XML),
        Err("timeout"),
        Ok(ORDER_XML),
    ]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let first = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();
    handler
        .submit(&mut log, &mut state, &first.document, "add payment")
        .await
        .unwrap();
    handler
        .submit(&mut log, &mut state, &first.document, "add payment")
        .await
        .unwrap();

    // The retry is replayed on top of the first exchange only.
    assert_eq!(backend.requests()[3].len(), 5);
    assert_eq!(log.last_reply(), Some(ACK_REPLY));
    assert_eq!(state.session().unwrap().exchange_count(), 3);
}

#[tokio::test]
async fn handle_turn_requires_pending_turn() {
    let backend = FakeBackend::scripted(vec![]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;
    let current = DiagramDocument::placeholder();

    let err = handler
        .handle_turn(&mut log, &mut state, &current)
        .await
        .unwrap_err();
    assert!(matches!(err, TurnError::NoPendingTurn));

    log.push_user("hi");
    log.set_last_reply("already answered");
    assert!(handler.handle_turn(&mut log, &mut state, &current).await.is_err());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn unusable_reply_falls_back_to_placeholder() {
    let backend = FakeBackend::scripted(vec![Ok("ok"), Ok("Sorry, I can't help with that.")]);
    let handler = handler(&backend);
    let mut log = ConversationLog::new();
    let mut state = SessionState::NotStarted;

    let outcome = handler
        .submit(&mut log, &mut state, &DiagramDocument::placeholder(), "orders")
        .await
        .unwrap();

    assert!(outcome.document.is_placeholder());
    assert_eq!(log.last_reply(), Some(ACK_REPLY));
    assert!(state.is_active());
}
