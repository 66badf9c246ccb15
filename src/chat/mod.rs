//! Chat session with the AI astronomer
//!
//! An append-only conversation with a single pending-request flag: one user
//! message may be awaiting its reply at a time. The history lives only as
//! long as the session value.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assistant::AssistantBridge;
use crate::catalog::Body;

/// Greeting the assistant opens a new session with
pub const GREETING: &str = "Hi! I'm your AI Astronomer. Ask me anything about the solar system! 🌌";

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Chat session errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,

    #[error("a request is already in flight")]
    RequestPending,

    #[error("no request is in flight")]
    NoPendingRequest,
}

/// Prompt submitted when the user picks a body in the orbit view
pub fn prompt_for_body(body: &Body) -> String {
    format!("Tell me about {}.", body.name)
}

/// Ordered conversation between the user and the assistant
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl ChatSession {
    /// Create a session opened by the assistant's greeting
    pub fn new() -> Self {
        let mut session = Self::empty();
        session.push(Role::Model, GREETING.to_string());
        session
    }

    /// Create a session with no messages
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether a user message is awaiting its reply
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a user message and mark the session as awaiting a reply
    ///
    /// Returns the prompt to send. The message is stored as typed.
    pub fn begin_turn(&mut self, input: &str) -> Result<String, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.pending {
            return Err(ChatError::RequestPending);
        }

        self.push(Role::User, input.to_string());
        self.pending = true;
        Ok(input.to_string())
    }

    /// Record the assistant's reply and clear the pending flag
    pub fn finish_turn(&mut self, reply: String) -> Result<&ChatMessage, ChatError> {
        if !self.pending {
            return Err(ChatError::NoPendingRequest);
        }

        self.pending = false;
        Ok(self.push(Role::Model, reply))
    }

    /// Send `input` through `bridge` and record both sides of the exchange
    pub fn submit(
        &mut self,
        bridge: &AssistantBridge,
        input: &str,
    ) -> Result<&ChatMessage, ChatError> {
        let prompt = self.begin_turn(input)?;
        let reply = bridge.ask(&prompt);
        self.finish_turn(reply)
    }

    /// Ask the assistant about a catalog body
    pub fn ask_about(
        &mut self,
        bridge: &AssistantBridge,
        body: &Body,
    ) -> Result<&ChatMessage, ChatError> {
        self.submit(bridge, &prompt_for_body(body))
    }

    /// Append a message, keeping timestamps strictly increasing
    fn push(&mut self, role: Role, text: String) -> &ChatMessage {
        let now = Utc::now();
        let timestamp = match self.messages.last() {
            Some(prev) if now <= prev.timestamp => prev.timestamp + Duration::microseconds(1),
            _ => now,
        };

        debug!("{:?} message #{} ({} chars)", role, self.messages.len(), text.len());
        self.messages.push(ChatMessage {
            role,
            text,
            timestamp,
        });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::UNCONFIGURED_REPLY;
    use crate::catalog::SOLAR_SYSTEM;

    #[test]
    fn test_new_session_greets() {
        let session = ChatSession::new();
        assert_eq!(session.len(), 1);
        assert_eq!(session.messages()[0].role, Role::Model);
        assert_eq!(session.messages()[0].text, GREETING);
        assert!(ChatSession::empty().is_empty());
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut session = ChatSession::empty();
        assert_eq!(session.begin_turn("first"), Ok("first".to_string()));
        assert!(session.is_pending());
        assert_eq!(session.begin_turn("second"), Err(ChatError::RequestPending));
        assert_eq!(session.len(), 1);

        session.finish_turn("reply".into()).unwrap();
        assert!(!session.is_pending());
        assert_eq!(
            session.finish_turn("stray".into()),
            Err(ChatError::NoPendingRequest)
        );
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let mut session = ChatSession::new();
        assert_eq!(session.begin_turn("   \t"), Err(ChatError::EmptyInput));
        assert_eq!(session.len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_submit_records_both_sides() {
        let mut session = ChatSession::new();
        let reply = session
            .submit(&AssistantBridge::unconfigured(), "Why is Venus hot?")
            .unwrap();
        assert_eq!(reply.role, Role::Model);
        assert_eq!(reply.text, UNCONFIGURED_REPLY);

        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
        assert_eq!(session.messages()[1].text, "Why is Venus hot?");
    }

    #[test]
    fn test_ask_about_body() {
        let mut session = ChatSession::empty();
        let earth = SOLAR_SYSTEM.get("Earth").unwrap();
        session
            .ask_about(&AssistantBridge::unconfigured(), earth)
            .unwrap();
        assert_eq!(session.messages()[0].text, "Tell me about Earth.");
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let mut session = ChatSession::empty();
        for i in 0..50 {
            session.begin_turn(&format!("q{}", i)).unwrap();
            session.finish_turn(format!("a{}", i)).unwrap();
        }
        assert!(session
            .messages()
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_message_serialization() {
        let mut session = ChatSession::empty();
        session.begin_turn("hello").unwrap();
        let value = serde_json::to_value(session.last().unwrap()).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["text"], "hello");
    }
}
