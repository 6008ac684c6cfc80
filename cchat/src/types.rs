//! Conversation records and turn outcome types.
//!
//! Timestamps live only here. The wire-facing [`Message`] type carries
//! none, so nothing time-related can leak into a provider request.

use std::time::SystemTime;

use ccommon::SessionId;
use cprovider::{Message, Role};

/// A [`Message`] wrapped with store-side creation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub message: Message,
    pub timestamp: SystemTime,
}

impl ChatMessage {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            timestamp: SystemTime::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.message.role
    }
}

/// One chat session's ordered message log.
///
/// `messages[0]` is always the seeding system message; it is never
/// duplicated or removed for the life of the conversation.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: SessionId,
    pub messages: Vec<ChatMessage>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl Conversation {
    pub fn new(id: SessionId, system_prompt: impl Into<String>) -> Self {
        let now = SystemTime::now();
        Self {
            id,
            messages: vec![ChatMessage::new(Message::system(system_prompt))],
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a message and bumps `updated_at`.
    pub fn append(&mut self, message: Message) {
        let record = ChatMessage::new(message);
        self.updated_at = record.timestamp;
        self.messages.push(record);
    }

    /// The transcript with store metadata stripped, ready for a
    /// [`CompletionRequest`](cprovider::CompletionRequest).
    pub fn wire_messages(&self) -> Vec<Message> {
        self.messages
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Result of one completed turn, as handed back to the session boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub final_text: String,
    pub timestamp: SystemTime,
}
