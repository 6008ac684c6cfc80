//! Unified facade over the concierge workspace crates.
//!
//! This crate is designed to be the single dependency for most
//! applications. It re-exports the core concierge crates and provides
//! configuration loading and runtime wiring for common deployments.

pub mod config;
pub mod prelude;
pub mod runtime;

pub use cchat;
pub use ccommon;
pub use cprovider;
pub use ctooling;

pub use cchat::{
    ChatError, ChatErrorKind, ChatMessage, ChatService, ChatServiceBuilder, Conversation,
    ConversationStore, DEFAULT_SYSTEM_PROMPT, SharedConversation, TurnOutcome,
};
pub use ccommon::{BoxFuture, MetadataMap, Registry, SessionId};
pub use cprovider::groq::{DEFAULT_GROQ_MODEL, GroqGateway};
pub use cprovider::{
    Completion, CompletionGateway, CompletionRequest, GatewayError, GatewayErrorKind,
    GatewayFuture, GenerationSettings, Message, Role, SecretString, TokenUsage, ToolCall,
    ToolDefinition, ToolResult, api_key_from_env,
};
pub use ctooling::builtins::{FlightSearchTool, HotelSearchTool, WeatherTool, WebSearchTool};
pub use ctooling::{
    FunctionTool, Tool, ToolContext, ToolError, ToolErrorKind, ToolExecutor, ToolFuture,
    ToolRegistry,
};

pub use config::{ConciergeConfig, ConfigError};
pub use runtime::{chat_service, tool_registry};
