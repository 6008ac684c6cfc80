//! Groq gateway implementation over the transport and serde layers.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    Completion, CompletionGateway, CompletionRequest, GatewayError, GatewayFuture,
    GenerationSettings, SecretString,
};

use super::serde_api::{build_api_request, parse_completion};
use super::transport::{GroqHttpTransport, GroqTransport};

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Completion gateway backed by the Groq chat-completions API.
///
/// Sampling settings are fixed at construction time and attached to every
/// outbound request; callers cannot vary them per call.
#[derive(Clone)]
pub struct GroqGateway {
    transport: Arc<dyn GroqTransport>,
    api_key: SecretString,
    fallback_model: String,
    settings: GenerationSettings,
}

impl GroqGateway {
    pub fn new(api_key: SecretString, transport: Arc<dyn GroqTransport>) -> Self {
        Self {
            transport,
            api_key,
            fallback_model: DEFAULT_GROQ_MODEL.to_string(),
            settings: GenerationSettings::default(),
        }
    }

    /// Builds a gateway over HTTPS with the default request timeout.
    pub fn over_http(api_key: SecretString) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        Ok(Self::new(api_key, Arc::new(GroqHttpTransport::new(client))))
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}

impl CompletionGateway for GroqGateway {
    fn complete<'a>(
        &'a self,
        mut request: CompletionRequest,
    ) -> GatewayFuture<'a, Result<Completion, GatewayError>> {
        Box::pin(async move {
            if request.model.trim().is_empty() {
                request.model = self.fallback_model.clone();
            }

            request.validate()?;
            let api_request = build_api_request(request, &self.settings)?;
            let api_response = self.transport.exchange(api_request, &self.api_key).await?;
            let completion = parse_completion(api_response)?;

            tracing::debug!(
                phase = "gateway",
                event = "completion",
                text_len = completion.text.len(),
                tool_call_count = completion.tool_calls.len(),
                total_tokens = completion.usage.total_tokens,
            );

            Ok(completion)
        })
    }
}
