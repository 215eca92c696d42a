//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod output;
mod providers;
mod server;
mod specialists;
mod synthesis;

pub use council::FileCouncilConfig;
pub use output::FileOutputConfig;
pub use providers::{FileChatConfig, FileInferenceConfig, FileProvidersConfig, FileSearchConfig};
pub use server::FileServerConfig;
pub use specialists::FileSpecialistConfig;
pub use synthesis::{FileChainEntry, FileSynthesisConfig};

use crate::providers::ProviderKind;
use astris_domain::{ConfigIssue, ConfigIssueCode, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener
    pub server: FileServerConfig,
    /// Timeouts and generation settings
    pub council: FileCouncilConfig,
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Lead synthesis fallback chain
    pub synthesis: FileSynthesisConfig,
    /// Per-role overrides, keyed by role id
    pub specialists: BTreeMap<String, FileSpecialistConfig>,
    /// CLI output settings
    pub output: FileOutputConfig,
}

/// A reasoning provider resolved from config: family, model and timeout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRoute {
    pub kind: ProviderKind,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderRoute {
    /// Label used in logs and synthesis attempts, e.g. `chat:gpt-4o-mini`
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind, self.model)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Credentials are checked separately by
    /// [`Credentials::resolve`](crate::config::Credentials::resolve).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.council.validate());
        if let Err(issue) = parse_provider("council.specialist_provider", &self.council.specialist_provider) {
            issues.push(issue);
        }
        issues.extend(self.providers.validate());

        if self.synthesis.chain.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptySynthesisChain,
                "synthesis.chain: at least one synthesis provider is required",
            ));
        }
        for (i, entry) in self.synthesis.chain.iter().enumerate() {
            issues.extend(entry.validate(&format!("synthesis.chain[{}]", i)));
        }

        for (key, entry) in &self.specialists {
            issues.extend(entry.validate(key));
        }

        issues
    }

    /// Provider for one specialist role, overrides applied
    pub fn specialist_route(&self, role: Role) -> Result<ProviderRoute, ConfigIssue> {
        let entry = self.specialists.get(role.as_str());
        let field = format!("specialists.{}", role.as_str());

        let provider = entry
            .and_then(|e| e.provider.as_deref())
            .unwrap_or(&self.council.specialist_provider);
        let kind = parse_provider(&format!("{}.provider", field), provider)?;
        let model = entry
            .and_then(|e| e.model.clone())
            .unwrap_or_else(|| self.default_model(kind).to_string());
        let secs = entry
            .and_then(|e| e.timeout_secs)
            .unwrap_or(self.council.specialist_timeout_secs);

        Ok(ProviderRoute {
            kind,
            model,
            timeout: Duration::from_secs(secs),
        })
    }

    /// Synthesis providers in chain order
    pub fn synthesis_routes(&self) -> Result<Vec<ProviderRoute>, ConfigIssue> {
        self.synthesis
            .chain
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let kind = parse_provider(&format!("synthesis.chain[{}].provider", i), &entry.provider)?;
                Ok(ProviderRoute {
                    kind,
                    model: entry
                        .model
                        .clone()
                        .unwrap_or_else(|| self.default_model(kind).to_string()),
                    timeout: Duration::from_secs(
                        entry
                            .timeout_secs
                            .unwrap_or(self.council.synthesis_timeout_secs),
                    ),
                })
            })
            .collect()
    }

    fn default_model(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Inference => &self.providers.inference.model,
            ProviderKind::Chat => &self.providers.chat.model,
        }
    }
}

/// Parse a reasoning provider family name.
fn parse_provider(field: &str, value: &str) -> Result<ProviderKind, ConfigIssue> {
    value.parse().map_err(|_| {
        ConfigIssue::error(
            ConfigIssueCode::UnknownProvider {
                field: field.to_string(),
                value: value.to_string(),
            },
            format!(
                "{}: unknown provider '{}', expected 'inference' or 'chat'",
                field, value
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use astris_domain::{OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
host = "127.0.0.1"
port = 9000

[council]
specialist_timeout_secs = 25
temperature = 0.3

[providers.inference]
model = "HuggingFaceH4/zephyr-7b-beta"

[[synthesis.chain]]
provider = "chat"
model = "gpt-4o"

[specialists.action-planning]
provider = "chat"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.council.specialist_timeout_secs, 25);
        assert_eq!(config.council.search_timeout_secs, 20);
        assert_eq!(config.synthesis.chain.len(), 1);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.server.port, 8000);
        assert!(config.output.color);
    }

    #[test]
    fn test_specialist_route_defaults_and_overrides() {
        let mut config = FileConfig::default();
        config.specialists.insert(
            "risk-assessment".to_string(),
            FileSpecialistConfig {
                provider: Some("chat".to_string()),
                model: None,
                timeout_secs: Some(40),
            },
        );

        let empath = config.specialist_route(Role::EmotionalAssessment).unwrap();
        assert_eq!(empath.kind, ProviderKind::Inference);
        assert_eq!(empath.model, config.providers.inference.model);
        assert_eq!(empath.timeout, Duration::from_secs(30));

        let sentinel = config.specialist_route(Role::RiskAssessment).unwrap();
        assert_eq!(sentinel.kind, ProviderKind::Chat);
        assert_eq!(sentinel.model, "gpt-4o-mini");
        assert_eq!(sentinel.timeout, Duration::from_secs(40));
        assert_eq!(sentinel.label(), "chat:gpt-4o-mini");
    }

    #[test]
    fn test_synthesis_routes_use_council_timeout() {
        let mut config = FileConfig::default();
        config.synthesis.chain = vec![
            FileChainEntry::new("chat").with_timeout_secs(10),
            FileChainEntry::new("inference").with_model("tiiuae/falcon-7b-instruct"),
        ];

        let routes = config.synthesis_routes().unwrap();
        assert_eq!(routes[0].timeout, Duration::from_secs(10));
        assert_eq!(routes[1].timeout, Duration::from_secs(45));
        assert_eq!(routes[1].label(), "inference:tiiuae/falcon-7b-instruct");
    }

    #[test]
    fn test_empty_chain_is_error() {
        let mut config = FileConfig::default();
        config.synthesis.chain.clear();

        let issues = config.validate();
        assert!(ConfigIssue::has_errors(&issues));
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::EmptySynthesisChain));
    }

    #[test]
    fn test_unknown_provider_collects_every_issue() {
        let mut config = FileConfig::default();
        config.council.specialist_provider = "bedrock".to_string();
        config.synthesis.chain = vec![FileChainEntry::new("oracle")];

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
        assert!(config.synthesis_routes().is_err());
        assert!(config.specialist_route(Role::ActionPlanning).is_err());
    }
}
