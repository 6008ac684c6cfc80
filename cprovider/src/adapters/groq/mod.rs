//! Groq adapter: OpenAI-compatible chat-completions over HTTPS.

mod provider;
mod serde_api;
mod transport;

pub use provider::{DEFAULT_GROQ_MODEL, GroqGateway};
pub use serde_api::{
    GroqApiAssistantMessage, GroqApiChoice, GroqApiMessage, GroqApiRequest, GroqApiResponse,
    GroqApiResponseToolCall, GroqApiResponseToolFunction, GroqApiUsage,
};
pub use transport::{GROQ_BASE_URL, GroqHttpTransport, GroqTransport};
