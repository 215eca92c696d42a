//! Text-generation inference adapter
//!
//! Talks to a hosted inference API that takes a single `inputs` string and
//! answers with a list of generations:
//!
//! ```json
//! [{ "generated_text": "..." }]
//! ```
//!
//! Some deployments echo the prompt at the start of `generated_text`; the
//! invokers strip that echo, so this adapter returns the text untouched.

use super::http::{provider_error, send_json};
use astris_application::{GatewayError, GenerationRequest, LlmGateway};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Gateway for one model on a text-generation inference API
pub struct InferenceGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

impl InferenceGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: &str,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
            api_key: api_key.into(),
            name: format!("inference:{}", model),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for InferenceGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        if self.api_key.is_empty() {
            return Err(GatewayError::MissingCredential(self.name.clone()));
        }

        let body = InferenceRequest {
            inputs: request.rendered(),
            parameters: InferenceParameters {
                max_new_tokens: request.max_new_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        debug!("POST {}", self.endpoint);
        let response = send_json(
            self.client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        parse_generations(&response)
    }
}

/// Extract the first generation from an inference response body.
pub(crate) fn parse_generations(body: &Value) -> Result<String, GatewayError> {
    if let Some(message) = provider_error(body) {
        return Err(GatewayError::Provider(message));
    }

    let first = match body {
        Value::Array(generations) => generations
            .first()
            .ok_or_else(|| GatewayError::UnexpectedShape("no generations returned".to_string()))?,
        Value::Object(_) => body,
        _ => {
            return Err(GatewayError::UnexpectedShape(
                "expected a list of generations".to_string(),
            ));
        }
    };

    first
        .get("generated_text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GatewayError::UnexpectedShape("generation has no generated_text".to_string()))
}
