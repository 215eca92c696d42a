//! Provider configuration from TOML (`[providers]` section)
//!
//! One sub-table per provider family. Credentials are looked up through
//! `api_key_env` unless an inline `api_key` is given.

use astris_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Text-generation inference endpoint (list-of-generations responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    /// Base URL; the model id is appended as a path segment.
    pub base_url: String,
    /// Environment variable name for the API key (default: "HF_API_TOKEN").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Default model for this family.
    pub model: String,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            api_key_env: "HF_API_TOKEN".to_string(),
            api_key: None,
            model: "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
        }
    }
}

/// OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Default model for this family.
    pub model: String,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Search/summarization endpoint (answer + results responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Base URL; `/search` is appended.
    pub base_url: String,
    /// Environment variable name for the API key (default: "TAVILY_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Number of results folded into the research context.
    pub max_results: usize,
    /// `basic` or `advanced`
    pub search_depth: String,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavily.com".to_string(),
            api_key_env: "TAVILY_API_KEY".to_string(),
            api_key: None,
            max_results: 5,
            search_depth: "basic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub inference: FileInferenceConfig,
    pub chat: FileChatConfig,
    pub search: FileSearchConfig,
}

impl FileProvidersConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, model) in [
            ("providers.inference.model", &self.inference.model),
            ("providers.chat.model", &self.chat.model),
        ] {
            if model.trim().is_empty() {
                issues.push(empty_model(field));
            }
        }

        issues
    }
}

pub(super) fn empty_model(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::EmptyModelName {
            field: field.to_string(),
        },
        format!("{}: model name cannot be empty", field),
    )
}
