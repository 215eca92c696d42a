//! OpenAI-compatible chat completion adapter

use super::http::{provider_error, send_json};
use astris_application::{GatewayError, GenerationRequest, LlmGateway};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Gateway for one model on a `/chat/completions` endpoint
pub struct ChatGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl ChatGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            name: format!("chat:{}", model),
            model,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_new_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl LlmGateway for ChatGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        if self.api_key.is_empty() {
            return Err(GatewayError::MissingCredential(self.name.clone()));
        }

        let body = self.build_request(request);

        debug!("POST {} ({})", self.endpoint, self.model);
        let response = send_json(
            self.client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        parse_completion(response)
    }
}

/// Extract the first choice's message content from a chat completion body.
pub(crate) fn parse_completion(body: Value) -> Result<String, GatewayError> {
    if let Some(message) = provider_error(&body) {
        return Err(GatewayError::Provider(message));
    }

    let response: ChatResponse = serde_json::from_value(body)
        .map_err(|e| GatewayError::UnexpectedShape(format!("not a chat completion: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::UnexpectedShape("no choices returned".to_string()))?
        .message
        .content
        .ok_or_else(|| GatewayError::UnexpectedShape("choice has no content".to_string()))
}
