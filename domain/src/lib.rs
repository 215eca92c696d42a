//! Domain layer for Astris
//!
//! This crate contains the core types of a council deliberation.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed set of specialist [`Role`]s answers the same [`Query`]
//! independently. Each branch settles into exactly one [`SpecialistResult`],
//! and the results are assembled into a total [`ResultBundle`] keyed by role.
//!
//! ## Synthesis
//!
//! A lead councillor merges the bundle into one answer. Each provider in the
//! synthesis chain produces a [`SynthesisAttempt`] whose outcome is decided by
//! [`classify_synthesis`].

pub mod config;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::{error::DomainError, query::Query, role::Role};
pub use council::{
    bundle::ResultBundle,
    normalize::normalize_generation,
    outcome::SpecialistResult,
    phase::Phase,
    synthesis::{
        AttemptOutcome, SynthesisAttempt, UNAVAILABILITY_MARKERS, classify_synthesis,
        unavailability_marker,
    },
};
pub use prompt::PromptTemplate;
