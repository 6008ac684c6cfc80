//! Completion gateway contracts and the Groq provider adapter.

mod adapters;
mod credentials;
mod error;
mod gateway;
mod model;

pub mod prelude {
    pub use crate::{
        Completion, CompletionGateway, CompletionRequest, GatewayError, GatewayErrorKind,
        GatewayFuture, GenerationSettings, Message, Role, SecretString, TokenUsage, ToolCall,
        ToolDefinition, ToolResult,
    };
    pub use crate::groq::{DEFAULT_GROQ_MODEL, GroqGateway};
}

pub use adapters::groq;
pub use credentials::{SecretString, api_key_from_env};
pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::{CompletionGateway, GatewayFuture};
pub use model::{
    Completion, CompletionRequest, GenerationSettings, Message, Role, TokenUsage, ToolCall,
    ToolDefinition, ToolResult,
};
