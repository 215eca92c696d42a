//! Configuration loading for Astris
//!
//! This module handles file I/O, merging of configuration from multiple
//! sources, validation, and credential resolution. The priority order
//! (highest to lowest):
//!
//! 1. Environment variables prefixed `ASTRIS_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./astris.toml` or `./.astris.toml`
//! 4. Global: `$XDG_CONFIG_HOME/astris/config.toml`
//! 5. Default values

mod credentials;
mod file_config;
mod loader;

pub use credentials::Credentials;
pub use file_config::{
    FileChainEntry, FileChatConfig, FileConfig, FileCouncilConfig, FileInferenceConfig,
    FileOutputConfig, FileProvidersConfig, FileSearchConfig, FileServerConfig,
    FileSpecialistConfig, FileSynthesisConfig, ProviderRoute,
};
pub use loader::{ConfigLoader, ENV_PREFIX};

use astris_domain::ConfigIssue;
use thiserror::Error;

/// Errors that stop the council from being assembled
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
