use super::http_client::build_provider_client_with_timeout;
use super::scrub::sanitize_api_error;
use super::traits::{Completion, CompletionClient, CompletionFuture};
use crate::config::{Config, DEFAULT_API_URL};
use crate::conversation::{CompletionMetadata, Message, Role};
use crate::error::LlmError;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

const PROVIDER_NAME: &str = "OpenAI";

/// Chat-completions client for OpenAI and API-compatible endpoints.
pub struct OpenAiClient {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: Role,
    content: &'a str,
}

impl OpenAiClient {
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_API_URL, 120)
    }

    pub fn with_endpoint(api_key: Option<&str>, url: &str, timeout_secs: u64) -> Self {
        Self {
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            url: url.to_string(),
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_endpoint(
            config.api_key.as_deref(),
            &config.api_url,
            config.request_timeout_secs,
        )
    }

    /// Only role and content go over the wire; stored completion metadata
    /// stays local.
    fn build_request<'a>(model: &'a str, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|message| RequestMessage {
                    role: message.role,
                    content: &message.content,
                })
                .collect(),
        }
    }

    fn extract_reply(metadata: &CompletionMetadata) -> Result<String, LlmError> {
        metadata
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| LlmError::EmptyResponse {
                provider: PROVIDER_NAME.into(),
            })
    }

    async fn call_api(&self, request: &ChatRequest<'_>) -> Result<CompletionMetadata, LlmError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or_else(|| LlmError::MissingApiKey {
                provider: PROVIDER_NAME.into(),
            })?;

        debug!(
            url = %self.url,
            model = request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", auth_header)
            .json(request)
            .send()
            .await
            .map_err(|error| LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
            return Err(LlmError::Api {
                provider: PROVIDER_NAME.into(),
                status: status.as_u16(),
                body: sanitize_api_error(&body),
            });
        }

        response.json().await.map_err(|error| LlmError::Request {
            provider: PROVIDER_NAME.into(),
            message: format!("response JSON decode failed: {error}"),
        })
    }
}

impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn generate_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [Message],
    ) -> CompletionFuture<'a> {
        Box::pin(async move {
            let request = Self::build_request(model, messages);
            let metadata = self.call_api(&request).await?;
            let reply = Self::extract_reply(&metadata)?;
            Ok(Completion { reply, metadata })
        })
    }
}
