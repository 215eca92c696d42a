//! Council configuration from TOML (`[council]` section)

use astris_application::CouncilParams;
use astris_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts and generation settings shared by every council call
///
/// # Example
///
/// ```toml
/// [council]
/// specialist_provider = "inference"   # default family for the four specialists
/// specialist_timeout_secs = 30
/// search_timeout_secs = 20
/// synthesis_timeout_secs = 45         # used by chain entries without their own
/// max_new_tokens = 512
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub specialist_provider: String,
    pub specialist_timeout_secs: u64,
    pub search_timeout_secs: u64,
    pub synthesis_timeout_secs: u64,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            specialist_provider: "inference".to_string(),
            specialist_timeout_secs: 30,
            search_timeout_secs: 20,
            synthesis_timeout_secs: 45,
            max_new_tokens: 512,
            temperature: 0.7,
        }
    }
}

impl FileCouncilConfig {
    /// Convert to application parameters
    pub fn to_params(&self) -> CouncilParams {
        CouncilParams::default()
            .with_specialist_timeout(Duration::from_secs(self.specialist_timeout_secs))
            .with_search_timeout(Duration::from_secs(self.search_timeout_secs))
            .with_synthesis_timeout(Duration::from_secs(self.synthesis_timeout_secs))
            .with_max_new_tokens(self.max_new_tokens)
            .with_temperature(self.temperature)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, secs) in [
            ("specialist_timeout_secs", self.specialist_timeout_secs),
            ("search_timeout_secs", self.search_timeout_secs),
            ("synthesis_timeout_secs", self.synthesis_timeout_secs),
        ] {
            if secs == 0 {
                issues.push(zero_timeout(&format!("council.{}", field)));
            }
        }

        issues
    }
}

pub(super) fn zero_timeout(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::ZeroTimeout {
            field: field.to_string(),
        },
        format!("{}: timeout must be at least one second", field),
    )
}
