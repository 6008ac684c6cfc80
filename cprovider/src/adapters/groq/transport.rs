//! Groq transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response, StatusCode};

use crate::{GatewayError, GatewayFuture, SecretString};

use super::serde_api::{GroqApiRequest, GroqApiResponse, extract_error_message};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub trait GroqTransport: Send + Sync {
    fn exchange<'a>(
        &'a self,
        request: GroqApiRequest,
        api_key: &'a SecretString,
    ) -> GatewayFuture<'a, Result<GroqApiResponse, GatewayError>>;
}

#[derive(Debug, Clone)]
pub struct GroqHttpTransport {
    client: Client,
    base_url: String,
}

impl GroqHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Groq request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GatewayError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => GatewayError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                GatewayError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                GatewayError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                GatewayError::unavailable(message)
            }
            status if status.is_server_error() => GatewayError::unavailable(message),
            _ => GatewayError::transport(message),
        }
    }
}

impl GroqTransport for GroqHttpTransport {
    fn exchange<'a>(
        &'a self,
        request: GroqApiRequest,
        api_key: &'a SecretString,
    ) -> GatewayFuture<'a, Result<GroqApiResponse, GatewayError>> {
        Box::pin(async move {
            let url = self.endpoint("chat/completions");
            tracing::debug!(
                phase = "gateway",
                event = "request",
                model = %request.model,
                message_count = request.messages.len(),
                tool_count = request.tools.as_ref().map_or(0, Vec::len),
            );

            let response = self
                .client
                .post(url)
                .bearer_auth(api_key.expose())
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        GatewayError::timeout(err.to_string())
                    } else {
                        GatewayError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                let error = Self::parse_error(response).await;
                tracing::warn!(
                    phase = "gateway",
                    event = "error_response",
                    error_kind = ?error.kind,
                    error = %error,
                );
                return Err(error);
            }

            response
                .json::<GroqApiResponse>()
                .await
                .map_err(|err| GatewayError::malformed(err.to_string()))
        })
    }
}
