//! Structured configuration issues.
//!
//! Config loading collects every problem it finds instead of stopping at the
//! first one. Any issue with [`Severity::Error`] is fatal at startup.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A provider family has no credential in config or environment.
    MissingCredential { family: String, env_var: String },
    /// The synthesis chain has no providers.
    EmptySynthesisChain,
    /// A chain or specialist entry names an unknown provider family.
    UnknownProvider { field: String, value: String },
    /// A model name is empty.
    EmptyModelName { field: String },
    /// A timeout of zero seconds would fail every call.
    ZeroTimeout { field: String },
    /// A `[specialists]` key is not a known role.
    UnknownRole { value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let warning = ConfigIssue::warning(
            ConfigIssueCode::UnknownRole {
                value: "oracle".to_string(),
            },
            "unknown role",
        );
        assert!(!ConfigIssue::has_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue::error(ConfigIssueCode::EmptySynthesisChain, "empty chain");
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }

    #[test]
    fn test_display_prefixes_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptySynthesisChain, "no providers");
        assert_eq!(issue.to_string(), "error: no providers");
    }
}
