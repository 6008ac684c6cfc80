//! Conversation state and turn orchestration over a completion gateway.

mod error;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatMessage, ChatService, ChatServiceBuilder, Conversation,
        ConversationStore, DEFAULT_SYSTEM_PROMPT, SharedConversation, TurnOutcome,
    };
    pub use ccommon::SessionId;
}

pub use error::{ChatError, ChatErrorKind};
pub use service::{ChatService, ChatServiceBuilder, DEFAULT_SYSTEM_PROMPT};
pub use store::{ConversationStore, SharedConversation};
pub use types::{ChatMessage, Conversation, TurnOutcome};
pub use ccommon::SessionId;
