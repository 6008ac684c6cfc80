//! Groq HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Completion, CompletionRequest, GatewayError, GenerationSettings, Message, TokenUsage, ToolCall,
    ToolDefinition,
};

pub(crate) fn build_api_request(
    request: CompletionRequest,
    settings: &GenerationSettings,
) -> Result<GroqApiRequest, GatewayError> {
    let messages = request
        .messages
        .into_iter()
        .map(GroqApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let (tools, tool_choice) = if request.tools.is_empty() {
        (None, None)
    } else {
        let tools = request
            .tools
            .into_iter()
            .map(GroqApiTool::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        // "auto" leaves the invocation decision to the model.
        (Some(tools), Some("auto".to_string()))
    };

    Ok(GroqApiRequest {
        model: request.model,
        messages,
        tools,
        tool_choice,
        temperature: settings.temperature,
        top_p: settings.top_p,
        max_completion_tokens: settings.max_completion_tokens,
        stop: settings.stop.clone(),
    })
}

pub(crate) fn parse_completion(response: GroqApiResponse) -> Result<Completion, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::malformed("Groq response did not include choices"))?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| ToolCall {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        })
        .collect::<Vec<_>>();

    let usage = response.usage.unwrap_or_default();

    Ok(Completion {
        text: choice.message.content.unwrap_or_default(),
        tool_calls,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
    })
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GroqApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiErrorEnvelope {
    pub error: GroqApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GroqApiRequest {
    pub model: String,
    pub messages: Vec<GroqApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GroqApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GroqApiMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<GroqApiRequestToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl TryFrom<Message> for GroqApiMessage {
    type Error = GatewayError;

    fn try_from(value: Message) -> Result<Self, Self::Error> {
        if value.content.is_empty() && value.role != crate::Role::Assistant {
            return Err(GatewayError::invalid_request(format!(
                "Groq {} message content must not be empty",
                value.role
            )));
        }

        // Assistant messages that triggered tools must echo their tool_calls
        // array back to the provider so the following tool messages pair up.
        let tool_calls = if value.tool_calls.is_empty() {
            None
        } else {
            Some(
                value
                    .tool_calls
                    .into_iter()
                    .map(GroqApiRequestToolCall::from)
                    .collect(),
            )
        };

        Ok(Self {
            role: value.role.to_string(),
            content: value.content,
            tool_calls,
            tool_call_id: value.tool_call_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GroqApiRequestToolCall {
    pub id: String,
    pub r#type: String,
    pub function: GroqApiRequestToolFunction,
}

impl From<ToolCall> for GroqApiRequestToolCall {
    fn from(value: ToolCall) -> Self {
        Self {
            id: value.id,
            r#type: "function".to_string(),
            function: GroqApiRequestToolFunction {
                name: value.name,
                arguments: value.arguments,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroqApiRequestToolFunction {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct GroqApiTool {
    pub r#type: String,
    pub function: GroqApiFunction,
}

impl TryFrom<ToolDefinition> for GroqApiTool {
    type Error = GatewayError;

    fn try_from(value: ToolDefinition) -> Result<Self, Self::Error> {
        let parameters = serde_json::from_str::<Value>(&value.parameters).map_err(|_| {
            GatewayError::invalid_request(format!(
                "tool '{}' schema must be valid JSON",
                value.name
            ))
        })?;

        Ok(Self {
            r#type: "function".to_string(),
            function: GroqApiFunction {
                name: value.name,
                description: value.description,
                parameters,
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GroqApiFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
pub struct GroqApiResponse {
    pub choices: Vec<GroqApiChoice>,
    pub usage: Option<GroqApiUsage>,
}

#[derive(Debug, Deserialize)]
pub struct GroqApiChoice {
    pub message: GroqApiAssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct GroqApiAssistantMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<GroqApiResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct GroqApiResponseToolCall {
    pub id: String,
    pub function: GroqApiResponseToolFunction,
}

#[derive(Debug, Deserialize)]
pub struct GroqApiResponseToolFunction {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct GroqApiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
