//! Synthesis chain configuration from TOML (`[synthesis]` section)

use super::council::zero_timeout;
use super::providers::empty_model;
use astris_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// One link of the synthesis fallback chain
///
/// Links may differ by provider family, by model, or both.
///
/// # Example
///
/// ```toml
/// [[synthesis.chain]]
/// provider = "chat"
/// model = "gpt-4o-mini"
/// timeout_secs = 45
///
/// [[synthesis.chain]]
/// provider = "inference"     # falls back to providers.inference.model
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChainEntry {
    /// `chat` or `inference`
    pub provider: String,
    /// Overrides the family's default model
    pub model: Option<String>,
    /// Overrides `council.synthesis_timeout_secs`
    pub timeout_secs: Option<u64>,
}

impl FileChainEntry {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
            timeout_secs: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub(super) fn validate(&self, field: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Err(issue) = super::parse_provider(&format!("{}.provider", field), &self.provider) {
            issues.push(issue);
        }
        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            issues.push(empty_model(&format!("{}.model", field)));
        }
        if self.timeout_secs == Some(0) {
            issues.push(zero_timeout(&format!("{}.timeout_secs", field)));
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesisConfig {
    /// Providers in the order they are tried
    pub chain: Vec<FileChainEntry>,
}

impl Default for FileSynthesisConfig {
    fn default() -> Self {
        Self {
            chain: vec![FileChainEntry::new("chat"), FileChainEntry::new("inference")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_default_chain_crosses_families() {
        let config = FileSynthesisConfig::default();
        let providers: Vec<_> = config.chain.iter().map(|e| e.provider.as_str()).collect();
        assert_eq!(providers, vec!["chat", "inference"]);
    }

    #[test]
    fn test_chain_replaces_default() {
        let toml_str = r#"
[[synthesis.chain]]
provider = "chat"
model = "gpt-4o"

[[synthesis.chain]]
provider = "chat"
model = "gpt-4o-mini"
timeout_secs = 20
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.synthesis.chain,
            vec![
                FileChainEntry::new("chat").with_model("gpt-4o"),
                FileChainEntry::new("chat")
                    .with_model("gpt-4o-mini")
                    .with_timeout_secs(20),
            ]
        );
    }

    #[test]
    fn test_entry_validation() {
        let entry = FileChainEntry::new("oracle")
            .with_model("")
            .with_timeout_secs(0);
        assert_eq!(entry.validate("synthesis.chain[0]").len(), 3);
        assert!(FileChainEntry::new("chat").validate("synthesis.chain[0]").is_empty());
    }
}
