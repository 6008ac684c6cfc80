use std::sync::{Arc, Mutex};

use cprovider::groq::{
    GroqApiAssistantMessage, GroqApiChoice, GroqApiRequest, GroqApiResponse,
    GroqApiResponseToolCall, GroqApiResponseToolFunction, GroqGateway, GroqTransport,
};
use cprovider::{
    CompletionGateway, CompletionRequest, GatewayError, GatewayErrorKind, GatewayFuture, Message,
    SecretString, ToolDefinition,
};

struct ScriptedTransport {
    requests: Mutex<Vec<GroqApiRequest>>,
    responses: Mutex<Vec<Result<GroqApiResponse, GatewayError>>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<GroqApiResponse, GatewayError>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }
}

impl GroqTransport for ScriptedTransport {
    fn exchange<'a>(
        &'a self,
        request: GroqApiRequest,
        _api_key: &'a SecretString,
    ) -> GatewayFuture<'a, Result<GroqApiResponse, GatewayError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            self.responses
                .lock()
                .expect("responses lock")
                .remove(0)
        })
    }
}

fn text_response(text: &str) -> GroqApiResponse {
    GroqApiResponse {
        choices: vec![GroqApiChoice {
            message: GroqApiAssistantMessage {
                content: Some(text.to_string()),
                tool_calls: None,
            },
        }],
        usage: None,
    }
}

#[tokio::test]
async fn gateway_applies_fixed_sampling_settings_to_every_request() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(text_response("hello"))]));
    let gateway = GroqGateway::new(SecretString::new("gsk_test"), transport.clone());

    let completion = gateway
        .complete(CompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message::user("hi")],
        ))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.text, "hello");
    assert!(completion.tool_calls.is_empty());

    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].temperature, 0.7);
    assert_eq!(requests[0].top_p, 0.9);
    assert_eq!(requests[0].max_completion_tokens, 1000);
    assert_eq!(requests[0].stop, vec!["\nUser:", "\nAssistant:"]);
}

#[tokio::test]
async fn gateway_fills_in_fallback_model_for_empty_model() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(text_response("ok"))]));
    let gateway = GroqGateway::new(SecretString::new("gsk_test"), transport.clone());

    gateway
        .complete(CompletionRequest::new("", vec![Message::user("hi")]))
        .await
        .expect("completion should succeed");

    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests[0].model, "llama-3.3-70b-versatile");
}

#[tokio::test]
async fn gateway_normalizes_tool_call_responses() {
    let response = GroqApiResponse {
        choices: vec![GroqApiChoice {
            message: GroqApiAssistantMessage {
                content: None,
                tool_calls: Some(vec![GroqApiResponseToolCall {
                    id: "call_1".to_string(),
                    function: GroqApiResponseToolFunction {
                        name: "webSearch".to_string(),
                        arguments: r#"{"query":"rust"}"#.to_string(),
                    },
                }]),
            },
        }],
        usage: None,
    };

    let transport = Arc::new(ScriptedTransport::new(vec![Ok(response)]));
    let gateway = GroqGateway::new(SecretString::new("gsk_test"), transport);

    let completion = gateway
        .complete(
            CompletionRequest::new("llama-3.3-70b-versatile", vec![Message::user("search")])
                .with_tools(vec![ToolDefinition {
                    name: "webSearch".to_string(),
                    description: "Search the web".to_string(),
                    parameters: r#"{"type":"object"}"#.to_string(),
                }]),
        )
        .await
        .expect("completion should succeed");

    assert!(completion.text.is_empty());
    assert_eq!(completion.tool_calls.len(), 1);
    assert_eq!(completion.tool_calls[0].id, "call_1");
    assert_eq!(completion.tool_calls[0].arguments, r#"{"query":"rust"}"#);
}

#[tokio::test]
async fn gateway_propagates_typed_transport_failures_without_retrying() {
    let transport = Arc::new(ScriptedTransport::new(vec![Err(GatewayError::rate_limited(
        "try again later",
    ))]));
    let gateway = GroqGateway::new(SecretString::new("gsk_test"), transport.clone());

    let error = gateway
        .complete(CompletionRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message::user("hi")],
        ))
        .await
        .expect_err("completion should fail");

    assert_eq!(error.kind, GatewayErrorKind::RateLimited);
    assert!(error.retryable);
    assert_eq!(
        transport.requests.lock().expect("requests lock").len(),
        1,
        "gateway must not retry on its own",
    );
}

#[tokio::test]
async fn gateway_rejects_invalid_requests_before_transport() {
    let transport = Arc::new(ScriptedTransport::new(Vec::new()));
    let gateway = GroqGateway::new(SecretString::new("gsk_test"), transport.clone());

    let error = gateway
        .complete(CompletionRequest::new(
            "llama-3.3-70b-versatile",
            Vec::new(),
        ))
        .await
        .expect_err("empty conversation should fail");

    assert_eq!(error.kind, GatewayErrorKind::InvalidRequest);
    assert!(transport.requests.lock().expect("requests lock").is_empty());
}
