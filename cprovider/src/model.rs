//! Provider-agnostic message, request, and completion model types.
//!
//! ```rust
//! use cprovider::{CompletionRequest, GatewayErrorKind, Message};
//!
//! let ok = CompletionRequest::new(
//!     "llama-3.3-70b-versatile",
//!     vec![Message::system("You are helpful."), Message::user("hi")],
//! );
//! assert!(ok.validate().is_ok());
//!
//! let err = CompletionRequest::new("llama-3.3-70b-versatile", Vec::new())
//!     .validate()
//!     .expect_err("empty conversation should fail");
//! assert_eq!(err.kind, GatewayErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};

use crate::GatewayError;

/// Closed set of conversation roles understood by the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        };

        f.write_str(role)
    }
}

/// One turn unit as transmitted to the provider.
///
/// This type deliberately carries no timestamps or other transport metadata;
/// storage layers wrap it in their own record types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Requested tool invocations; populated only on assistant messages
    /// that triggered tools.
    pub tool_calls: Vec<ToolCall>,
    /// Back-reference to the invocation this message answers; required on
    /// tool messages and absent otherwise.
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Assistant message recording requested tool invocations; `content`
    /// may be empty and preserves any partial text the provider returned
    /// alongside the calls.
    pub fn assistant_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Declarative tool description forwarded verbatim to the provider.
///
/// `parameters` holds a JSON-schema object as serialized text; the gateway
/// transmits it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: String,
}

/// Tool invocation requested by the model. Never constructed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Output of executing one [`ToolCall`], already formatted as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
}

/// Sampling configuration fixed per deployment, never varied per call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_completion_tokens: u32,
    pub stop: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_completion_tokens: 1000,
            stop: vec!["\nUser:".to_string(), "\nAssistant:".to_string()],
        }
    }
}

/// One conversation snapshot sent to the completion provider.
///
/// An empty `tools` list signals that tool use is disabled for this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn tools_enabled(&self) -> bool {
        !self.tools.is_empty()
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.model.trim().is_empty() {
            return Err(GatewayError::invalid_request("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(GatewayError::invalid_request(
                "at least one message is required",
            ));
        }

        for message in &self.messages {
            if message.content.is_empty() && message.role != Role::Assistant {
                return Err(GatewayError::invalid_request(format!(
                    "{} message content must not be empty",
                    message.role
                )));
            }

            if message.role == Role::Tool && message.tool_call_id.is_none() {
                return Err(GatewayError::invalid_request(
                    "tool message requires a tool_call_id",
                ));
            }

            if message.role != Role::Tool && message.tool_call_id.is_some() {
                return Err(GatewayError::invalid_request(format!(
                    "{} message must not carry a tool_call_id",
                    message.role
                )));
            }

            if message.role != Role::Assistant && message.has_tool_calls() {
                return Err(GatewayError::invalid_request(format!(
                    "{} message must not carry tool calls",
                    message.role
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Normalized provider response: final text, requested tool invocations,
/// or both at once (partial text accompanying tool calls).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

impl Completion {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_empty_content_only_on_assistant_messages() {
        let request = CompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![
                Message::system("sys"),
                Message::user("hi"),
                Message::assistant_with_tool_calls(
                    "",
                    vec![ToolCall {
                        id: "call_1".to_string(),
                        name: "webSearch".to_string(),
                        arguments: "{}".to_string(),
                    }],
                ),
                Message::tool_result("call_1", "results"),
            ],
        );

        assert!(request.validate().is_ok());

        let empty_user =
            CompletionRequest::new("llama-3.3-70b-versatile", vec![Message::user("")]);
        assert!(empty_user.validate().is_err());
    }

    #[test]
    fn validate_rejects_misplaced_tool_metadata() {
        let stray_id = CompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message {
                role: Role::User,
                content: "hi".to_string(),
                tool_calls: Vec::new(),
                tool_call_id: Some("call_1".to_string()),
            }],
        );
        assert!(stray_id.validate().is_err());

        let missing_id = CompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message {
                role: Role::Tool,
                content: "results".to_string(),
                tool_calls: Vec::new(),
                tool_call_id: None,
            }],
        );
        assert!(missing_id.validate().is_err());
    }

    #[test]
    fn default_generation_settings_match_deployment_fixtures() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.top_p, 0.9);
        assert_eq!(settings.max_completion_tokens, 1000);
        assert_eq!(settings.stop.len(), 2);
    }
}
