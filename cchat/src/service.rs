//! Turn orchestration over the completion gateway and tool executor.
//!
//! A turn issues at most two gateway calls. The first carries every
//! registered tool declaration; if the model requests tool invocations,
//! the results re-enter the transcript and the second call carries an
//! empty tool list so the model must answer in text. Disabling tools on
//! the follow-up is a hard invariant of the loop, not a setting.

use std::sync::Arc;
use std::time::Duration;

use ccommon::SessionId;
use cprovider::{CompletionGateway, CompletionRequest, Message};
use ctooling::{ToolContext, ToolExecutor};

use crate::{ChatError, Conversation, ConversationStore, TurnOutcome};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. When you need to search \
    for current information or recent events, use the webSearch function. Use getWeather for \
    weather conditions, searchFlights for flight lookups, and searchHotels for accommodation \
    questions. Always use the proper function calling format.";

pub struct ChatService {
    gateway: Arc<dyn CompletionGateway>,
    executor: Arc<ToolExecutor>,
    store: Arc<ConversationStore>,
    model: String,
}

pub struct ChatServiceBuilder {
    gateway: Arc<dyn CompletionGateway>,
    executor: Arc<ToolExecutor>,
    system_prompt: String,
    model: String,
}

impl ChatServiceBuilder {
    pub fn new(gateway: Arc<dyn CompletionGateway>, executor: Arc<ToolExecutor>) -> Self {
        Self {
            gateway,
            executor,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: String::new(),
        }
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Model identifier sent with every request. An empty value defers to
    /// the gateway's own fallback model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            gateway: self.gateway,
            executor: self.executor,
            store: Arc::new(ConversationStore::new(self.system_prompt)),
            model: self.model,
        }
    }
}

impl ChatService {
    pub fn builder(
        gateway: Arc<dyn CompletionGateway>,
        executor: Arc<ToolExecutor>,
    ) -> ChatServiceBuilder {
        ChatServiceBuilder::new(gateway, executor)
    }

    pub fn store(&self) -> Arc<ConversationStore> {
        Arc::clone(&self.store)
    }

    /// Runs one user turn to completion.
    ///
    /// A missing or unknown session id creates a fresh conversation. Turns
    /// on the same session serialize behind its lock; turns on different
    /// sessions proceed concurrently.
    pub async fn submit_turn(
        &self,
        session_id: Option<SessionId>,
        user_text: &str,
    ) -> Result<TurnOutcome, ChatError> {
        if user_text.trim().is_empty() {
            return Err(ChatError::invalid_request("user_text must not be empty"));
        }

        let (session_id, conversation) = self.store.open(session_id)?;
        let mut conversation = conversation.lock().await;

        tracing::info!(
            phase = "chat",
            event = "turn_start",
            session_id = %session_id,
            transcript_len = conversation.len(),
        );

        // Snapshot for restoration if the gateway fails mid-turn; the
        // appended user message itself stays so resubmission continues
        // the conversation.
        let updated_at = conversation.updated_at;
        conversation.append(Message::user(user_text));

        let final_text = match self.drive_turn(&session_id, &mut conversation).await {
            Ok(final_text) => final_text,
            Err(error) => {
                conversation.updated_at = updated_at;
                tracing::warn!(
                    phase = "chat",
                    event = "turn_failed",
                    session_id = %session_id,
                    error = %error,
                );
                return Err(error);
            }
        };

        tracing::info!(
            phase = "chat",
            event = "turn_complete",
            session_id = %session_id,
            response_len = final_text.len(),
        );

        Ok(TurnOutcome {
            session_id,
            final_text,
            timestamp: conversation.updated_at,
        })
    }

    pub fn delete_session(&self, session_id: &SessionId) -> Result<bool, ChatError> {
        self.store.delete_session(session_id)
    }

    pub fn evict_stale(&self, max_age: Duration) -> Result<usize, ChatError> {
        self.store.evict_stale(max_age)
    }

    async fn drive_turn(
        &self,
        session_id: &SessionId,
        conversation: &mut Conversation,
    ) -> Result<String, ChatError> {
        let first_request =
            CompletionRequest::new(self.model.clone(), conversation.wire_messages())
                .with_tools(self.executor.definitions());

        let completion = self.gateway.complete(first_request).await?;
        if !completion.has_tool_calls() {
            conversation.append(Message::assistant(completion.text.clone()));
            return Ok(completion.text);
        }

        tracing::info!(
            phase = "chat",
            event = "tool_round",
            session_id = %session_id,
            tool_calls = completion.tool_calls.len(),
        );

        // Partial text accompanying the calls is kept on the assistant
        // message rather than dropped.
        conversation.append(Message::assistant_with_tool_calls(
            completion.text,
            completion.tool_calls.clone(),
        ));

        let context = ToolContext::new(session_id.clone());
        let results = self
            .executor
            .execute_all(completion.tool_calls, &context)
            .await;

        for result in results {
            conversation.append(Message::tool_result(result.tool_call_id, result.content));
        }

        // Tools disabled on the follow-up call; one tool round per turn.
        let final_request =
            CompletionRequest::new(self.model.clone(), conversation.wire_messages());

        let completion = self.gateway.complete(final_request).await?;
        conversation.append(Message::assistant(completion.text.clone()));
        Ok(completion.text)
    }
}
