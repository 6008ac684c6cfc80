use std::sync::{Arc, Mutex};
use std::time::Duration;

use cchat::prelude::*;
use cprovider::{
    Completion, CompletionGateway, CompletionRequest, GatewayError, GatewayErrorKind,
    GatewayFuture, Role, TokenUsage, ToolCall, ToolDefinition,
};
use ctooling::{ToolExecutor, ToolRegistry};

/// Gateway fake that replays a fixed script of responses while recording
/// every request it receives.
struct ScriptedGateway {
    requests: Mutex<Vec<CompletionRequest>>,
    responses: Mutex<Vec<Result<Completion, GatewayError>>>,
}

impl ScriptedGateway {
    fn new(responses: Vec<Result<Completion, GatewayError>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl CompletionGateway for ScriptedGateway {
    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> GatewayFuture<'a, Result<Completion, GatewayError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            let mut responses = self.responses.lock().expect("responses lock");
            if responses.is_empty() {
                return Err(GatewayError::unavailable("script exhausted"));
            }

            responses.remove(0)
        })
    }
}

fn text_completion(text: &str) -> Completion {
    Completion {
        text: text.to_string(),
        tool_calls: Vec::new(),
        usage: TokenUsage::default(),
    }
}

fn tool_completion(partial_text: &str, calls: Vec<ToolCall>) -> Completion {
    Completion {
        text: partial_text.to_string(),
        tool_calls: calls,
        usage: TokenUsage::default(),
    }
}

fn search_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register_fn(
        ToolDefinition {
            name: "webSearch".to_string(),
            description: "Searches the web".to_string(),
            parameters: r#"{"type":"object","properties":{"query":{"type":"string"}},"required":["query"]}"#.to_string(),
        },
        |args, _ctx| async move { Ok(format!("results for {args}")) },
    );

    registry
}

fn service_with(gateway: Arc<ScriptedGateway>) -> ChatService {
    let executor = Arc::new(ToolExecutor::new(Arc::new(search_registry())));
    ChatService::builder(gateway, executor)
        .model("llama-3.3-70b-versatile")
        .build()
}

async fn transcript_roles(service: &ChatService, session_id: &SessionId) -> Vec<Role> {
    let conversation = service
        .store()
        .get(session_id)
        .expect("store lock")
        .expect("conversation should exist");
    let conversation = conversation.lock().await;
    conversation.messages.iter().map(|m| m.role()).collect()
}

#[tokio::test]
async fn text_only_turn_appends_three_messages() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(text_completion("4"))]));
    let service = service_with(gateway.clone());

    let outcome = service
        .submit_turn(None, "What's 2+2?")
        .await
        .expect("turn should succeed");

    assert_eq!(outcome.final_text, "4");

    let roles = transcript_roles(&service, &outcome.session_id).await;
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);

    let requests = gateway.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].tools_enabled());
}

#[tokio::test]
async fn tool_turn_runs_one_round_and_disables_tools_on_the_second_call() {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "webSearch".to_string(),
        arguments: r#"{"query":"X"}"#.to_string(),
    };
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_completion("", vec![call])),
        Ok(text_completion("Found it")),
    ]));
    let service = service_with(gateway.clone());

    let outcome = service
        .submit_turn(Some(SessionId::new("s-b")), "search for X")
        .await
        .expect("turn should succeed");

    assert_eq!(outcome.final_text, "Found it");

    let roles = transcript_roles(&service, &outcome.session_id).await;
    assert_eq!(
        roles,
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::Tool,
            Role::Assistant,
        ],
    );

    let requests = gateway.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].tools_enabled());
    assert!(requests[1].tools.is_empty());
}

#[tokio::test]
async fn tool_results_echo_call_ids_in_request_order() {
    let calls = vec![
        ToolCall {
            id: "call_1".to_string(),
            name: "webSearch".to_string(),
            arguments: r#"{"query":"first"}"#.to_string(),
        },
        ToolCall {
            id: "call_2".to_string(),
            name: "missingTool".to_string(),
            arguments: "{}".to_string(),
        },
        ToolCall {
            id: "call_3".to_string(),
            name: "webSearch".to_string(),
            arguments: r#"{"query":"third"}"#.to_string(),
        },
    ];
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_completion("", calls)),
        Ok(text_completion("summarized")),
    ]));
    let service = service_with(gateway.clone());

    let outcome = service
        .submit_turn(Some(SessionId::new("s-order")), "search twice")
        .await
        .expect("turn should succeed");

    let conversation = service
        .store()
        .get(&outcome.session_id)
        .expect("store lock")
        .expect("conversation should exist");
    let conversation = conversation.lock().await;

    let tool_ids: Vec<_> = conversation
        .messages
        .iter()
        .filter(|m| m.role() == Role::Tool)
        .map(|m| m.message.tool_call_id.clone().expect("tool_call_id"))
        .collect();
    assert_eq!(tool_ids, vec!["call_1", "call_2", "call_3"]);

    // The unknown tool is absorbed inline rather than aborting the batch.
    let failed = &conversation.messages[4];
    assert!(failed.message.content.contains("missingTool"));
    assert!(failed.message.content.contains("failed"));
}

#[tokio::test]
async fn partial_assistant_text_is_preserved_alongside_tool_calls() {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "webSearch".to_string(),
        arguments: r#"{"query":"X"}"#.to_string(),
    };
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_completion("Let me look that up.", vec![call])),
        Ok(text_completion("Here you go")),
    ]));
    let service = service_with(gateway);

    let outcome = service
        .submit_turn(Some(SessionId::new("s-partial")), "search")
        .await
        .expect("turn should succeed");

    let conversation = service
        .store()
        .get(&outcome.session_id)
        .expect("store lock")
        .expect("conversation should exist");
    let conversation = conversation.lock().await;

    let with_calls = &conversation.messages[2];
    assert_eq!(with_calls.role(), Role::Assistant);
    assert!(with_calls.message.has_tool_calls());
    assert_eq!(with_calls.message.content, "Let me look that up.");
}

#[tokio::test]
async fn gateway_failure_aborts_the_turn_but_keeps_the_user_message() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::rate_limited(
        "429 from provider",
    ))]));
    let service = service_with(gateway.clone());

    let error = service
        .submit_turn(Some(SessionId::new("s-c")), "hello")
        .await
        .expect_err("turn should fail");

    assert_eq!(error.kind, ChatErrorKind::Gateway);
    let gateway_error = error.gateway.expect("gateway error should be attached");
    assert_eq!(gateway_error.kind, GatewayErrorKind::RateLimited);
    assert!(gateway_error.retryable);

    let roles = transcript_roles(&service, &SessionId::new("s-c")).await;
    assert_eq!(roles, vec![Role::System, Role::User]);
    assert_eq!(gateway.recorded_requests().len(), 1);
}

#[tokio::test]
async fn gateway_failure_restores_updated_at_so_the_session_stays_evictable() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::unavailable(
        "503",
    ))]));
    let service = service_with(gateway);
    let session_id = SessionId::new("s-evict");

    let before = {
        let (_, conversation) = service
            .store()
            .open(Some(session_id.clone()))
            .expect("open");
        let conversation = conversation.lock().await;
        conversation.updated_at
    };

    let _ = service
        .submit_turn(Some(session_id.clone()), "hello")
        .await
        .expect_err("turn should fail");

    let conversation = service
        .store()
        .get(&session_id)
        .expect("store lock")
        .expect("conversation should exist");
    let conversation = conversation.lock().await;
    assert_eq!(conversation.updated_at, before);
}

#[tokio::test]
async fn second_call_failure_keeps_tool_results_paired() {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "webSearch".to_string(),
        arguments: r#"{"query":"X"}"#.to_string(),
    };
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_completion("", vec![call])),
        Err(GatewayError::timeout("provider timed out")),
    ]));
    let service = service_with(gateway.clone());

    let error = service
        .submit_turn(Some(SessionId::new("s-late")), "search")
        .await
        .expect_err("turn should fail");
    assert_eq!(error.kind, ChatErrorKind::Gateway);

    // No orphaned tool-call-without-result pairs remain.
    let roles = transcript_roles(&service, &SessionId::new("s-late")).await;
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::Tool],
    );
    assert_eq!(gateway.recorded_requests().len(), 2);
}

#[tokio::test]
async fn empty_user_text_is_rejected_before_any_gateway_call() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(text_completion("unused"))]));
    let service = service_with(gateway.clone());

    let error = service
        .submit_turn(None, "   ")
        .await
        .expect_err("turn should fail");

    assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
    assert!(gateway.recorded_requests().is_empty());
}

#[tokio::test]
async fn consecutive_turns_share_one_transcript() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(text_completion("first answer")),
        Ok(text_completion("second answer")),
    ]));
    let service = service_with(gateway.clone());

    let first = service
        .submit_turn(None, "first question")
        .await
        .expect("first turn");
    let second = service
        .submit_turn(Some(first.session_id.clone()), "second question")
        .await
        .expect("second turn");

    assert_eq!(first.session_id, second.session_id);

    let roles = transcript_roles(&service, &second.session_id).await;
    assert_eq!(
        roles,
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
        ],
    );

    // The second request carries the full prior transcript.
    let requests = gateway.recorded_requests();
    assert_eq!(requests[1].messages.len(), 4);
}

#[tokio::test]
async fn delete_and_evict_manage_the_session_lifecycle() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(text_completion("a")),
        Ok(text_completion("b")),
    ]));
    let service = service_with(gateway);

    let kept = service.submit_turn(None, "one").await.expect("turn");
    let dropped = service.submit_turn(None, "two").await.expect("turn");

    assert!(service.delete_session(&dropped.session_id).expect("delete"));
    assert!(!service.delete_session(&dropped.session_id).expect("delete"));

    assert_eq!(
        service.evict_stale(Duration::from_secs(3600)).expect("evict"),
        0,
    );
    assert_eq!(service.evict_stale(Duration::ZERO).expect("evict"), 1);
    assert!(service.store().get(&kept.session_id).expect("store lock").is_none());
}
