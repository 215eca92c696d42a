//! LLM Gateway port
//!
//! Defines the interface for one call to a remote reasoning provider.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a single provider call
///
/// Adapters never retry; they report what went wrong and the invokers turn
/// it into a branch outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The body parsed, but not into a shape the adapter understands.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The provider answered with an error payload.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timeout")]
    Timeout,

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Returns `true` if the provider answered but with an unusable payload.
    ///
    /// These become `Degraded` outcomes; every other error is a `Failure`.
    pub fn is_degraded(&self) -> bool {
        matches!(self, GatewayError::UnexpectedShape(_))
    }
}

/// One generation request with its bounded parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_new_tokens: 512,
            temperature: 0.7,
        }
    }

    pub fn with_max_new_tokens(mut self, max: u32) -> Self {
        self.max_new_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// System and user prompt as one text, for providers without chat roles
    pub fn rendered(&self) -> String {
        format!("{}\n\n{}", self.system, self.prompt)
    }
}

/// Gateway to one remote reasoning provider
///
/// This port defines how the application layer talks to a provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Label used in logs and synthesis attempt records
    fn name(&self) -> &str;

    /// Make exactly one call and return the raw generated text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
