//! Per-role overrides from TOML (`[specialists.<role>]` tables)

use super::council::zero_timeout;
use super::providers::empty_model;
use astris_domain::{ConfigIssue, ConfigIssueCode, Role};
use serde::{Deserialize, Serialize};

/// Override for one specialist role
///
/// # Example
///
/// ```toml
/// [specialists.risk-assessment]
/// provider = "chat"
/// model = "gpt-4o"
/// timeout_secs = 40
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpecialistConfig {
    /// Overrides `council.specialist_provider`
    pub provider: Option<String>,
    /// Overrides the family's default model
    pub model: Option<String>,
    /// Overrides `council.specialist_timeout_secs`
    pub timeout_secs: Option<u64>,
}

impl FileSpecialistConfig {
    pub(super) fn validate(&self, key: &str) -> Vec<ConfigIssue> {
        let field = format!("specialists.{}", key);
        let mut issues = Vec::new();

        if key.parse::<Role>().is_err() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownRole {
                    value: key.to_string(),
                },
                format!(
                    "{}: unknown role, expected one of {}",
                    field,
                    Role::ALL.map(|r| r.as_str()).join(", ")
                ),
            ));
        }
        if let Some(provider) = &self.provider
            && let Err(issue) = super::parse_provider(&format!("{}.provider", field), provider)
        {
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
