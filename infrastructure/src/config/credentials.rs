//! Provider credentials
//!
//! Resolved once at startup. Invokers receive keys through their
//! constructors and never read the environment themselves.

use super::file_config::FileProvidersConfig;
use astris_domain::{ConfigIssue, ConfigIssueCode};
use std::fmt;

/// One API key per provider family
#[derive(Clone)]
pub struct Credentials {
    pub inference: String,
    pub chat: String,
    pub search: String,
}

impl Credentials {
    /// Resolve every family's key from the process environment.
    pub fn from_env(providers: &FileProvidersConfig) -> Result<Self, Vec<ConfigIssue>> {
        Self::resolve(providers, |name| std::env::var(name).ok())
    }

    /// Resolve every family's key.
    ///
    /// An inline `api_key` wins over `api_key_env`. Blank values count as
    /// missing. All missing families are reported together.
    pub fn resolve(
        providers: &FileProvidersConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Vec<ConfigIssue>> {
        let mut issues = Vec::new();
        let mut lookup = |family: &str, inline: &Option<String>, env_var: &str| {
            let key = inline
                .clone()
                .or_else(|| env(env_var))
                .filter(|key| !key.trim().is_empty());
            if key.is_none() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingCredential {
                        family: family.to_string(),
                        env_var: env_var.to_string(),
                    },
                    format!(
                        "providers.{}: no API key (set {} or providers.{}.api_key)",
                        family, env_var, family
                    ),
                ));
            }
            key.unwrap_or_default()
        };

        let inference = lookup(
            "inference",
            &providers.inference.api_key,
            &providers.inference.api_key_env,
        );
        let chat = lookup("chat", &providers.chat.api_key, &providers.chat.api_key_env);
        let search = lookup(
            "search",
            &providers.search.api_key,
            &providers.search.api_key_env,
        );

        if issues.is_empty() {
            Ok(Self {
                inference,
                chat,
                search,
            })
        } else {
            Err(issues)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("inference", &"<redacted>")
            .field("chat", &"<redacted>")
            .field("search", &"<redacted>")
            .finish()
    }
}
