//! Terminal outcome of a single council branch

use serde::{Deserialize, Serialize};

/// Outcome of one specialist or search branch.
///
/// Produced exactly once per branch per request. `Degraded` means the
/// provider answered but the answer carries no usable signal; the placeholder
/// keeps "no signal" distinguishable from "a signal that happens to be empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpecialistResult {
    Success { text: String },
    Degraded { placeholder: String, reason: String },
    Failure { reason: String },
}

impl SpecialistResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn degraded(placeholder: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Degraded {
            placeholder: placeholder.into(),
            reason: reason.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this branch produced usable text.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The usable text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            _ => None,
        }
    }

    /// Why the branch did not succeed, if it did not
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { reason, .. } | Self::Failure { reason } => Some(reason),
        }
    }

    /// Short status label (`success`, `degraded`, `failed`)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Degraded { .. } => "degraded",
            Self::Failure { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ok = SpecialistResult::success("plan");
        assert!(ok.is_success());
        assert_eq!(ok.text(), Some("plan"));
        assert_eq!(ok.reason(), None);

        let degraded = SpecialistResult::degraded("nothing to add", "empty generation");
        assert!(!degraded.is_success());
        assert!(!degraded.is_failure());
        assert_eq!(degraded.text(), None);
        assert_eq!(degraded.reason(), Some("empty generation"));

        let failed = SpecialistResult::failure("timeout");
        assert!(failed.is_failure());
        assert_eq!(failed.label(), "failed");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SpecialistResult::failure("timeout")).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["reason"], "timeout");
    }
}
