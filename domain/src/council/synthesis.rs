//! Synthesis attempts and their classification.
//!
//! A provider in the synthesis chain can "succeed" at the transport level and
//! still hand back an apology instead of an answer. [`classify_synthesis`] is
//! the single place that decides whether a returned text counts.

use super::normalize::normalize_generation;
use serde::{Deserialize, Serialize};

/// Lower-case substrings that mark a synthesized text as unusable.
///
/// `"[no input:"` is the marker the synthesis prompt uses for missing
/// councillors; a response that repeats it is echoing context, not answering.
pub const UNAVAILABILITY_MARKERS: &[&str] = &[
    "currently unavailable",
    "service unavailable",
    "model is unavailable",
    "is currently loading",
    "rate limit exceeded",
    "[no input:",
    "synthesis unavailable",
];

/// Outcome of one synthesis attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success { text: String },
    Degraded { reason: String },
    Failure { reason: String },
}

impl AttemptOutcome {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            reason: reason.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short status label (`success`, `degraded`, `failed`)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Degraded { .. } => "degraded",
            Self::Failure { .. } => "failed",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { reason } | Self::Failure { reason } => Some(reason),
        }
    }
}

/// Record of one provider tried in the synthesis chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisAttempt {
    /// Label of the provider in the chain
    pub provider: String,
    /// What the provider produced
    pub outcome: AttemptOutcome,
}

impl SynthesisAttempt {
    pub fn new(provider: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self {
            provider: provider.into(),
            outcome,
        }
    }
}

/// Find the first unavailability marker contained in `text`.
pub fn unavailability_marker(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    UNAVAILABILITY_MARKERS
        .iter()
        .copied()
        .find(|marker| lower.contains(marker))
}

/// Classify a text returned by a synthesis provider.
///
/// `Success` only if the normalized text is non-empty and carries none of the
/// [`UNAVAILABILITY_MARKERS`]; otherwise `Degraded`.
pub fn classify_synthesis(raw: &str, echoes: &[&str]) -> AttemptOutcome {
    let text = normalize_generation(raw, echoes);
    if text.is_empty() {
        return AttemptOutcome::degraded("empty synthesis");
    }
    if let Some(marker) = unavailability_marker(&text) {
        return AttemptOutcome::degraded(format!("response flags unavailability ({})", marker));
    }
    AttemptOutcome::Success { text }
}
