//! One-line import of the concierge surface most applications need.

pub use crate::config::{ConciergeConfig, ConfigError};
pub use crate::runtime::{chat_service, tool_registry};
pub use cchat::{
    ChatError, ChatErrorKind, ChatService, ChatServiceBuilder, DEFAULT_SYSTEM_PROMPT, TurnOutcome,
};
pub use ccommon::{MetadataMap, SessionId};
pub use cprovider::{
    CompletionGateway, GatewayError, GatewayErrorKind, GenerationSettings, Message, Role,
    SecretString,
};
pub use cprovider::groq::{DEFAULT_GROQ_MODEL, GroqGateway};
pub use ctooling::{Tool, ToolError, ToolErrorKind, ToolExecutor, ToolRegistry};
