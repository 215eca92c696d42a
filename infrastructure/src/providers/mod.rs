//! Provider adapters
//!
//! HTTP implementations of the application's gateway ports, one per
//! provider family.

mod chat;
mod http;
mod inference;
mod search;

pub use chat::ChatGateway;
pub use http::build_client;
pub use inference::InferenceGateway;
pub use search::WebSearchGateway;

use std::fmt;
use std::str::FromStr;

/// Families of reasoning providers a specialist or synthesis link can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Text-generation inference API, list-of-generations responses
    Inference,
    /// OpenAI-compatible chat completions
    Chat,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Inference => "inference",
            ProviderKind::Chat => "chat",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inference" | "hf" | "huggingface" => Ok(ProviderKind::Inference),
            "chat" | "openai" => Ok(ProviderKind::Chat),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}
