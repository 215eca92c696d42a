//! Council deliberation domain
//!
//! Result types for each stage of a deliberation:
//! - [`outcome::SpecialistResult`] - one branch's terminal outcome
//! - [`bundle::ResultBundle`] - every branch, keyed by role
//! - [`synthesis::SynthesisAttempt`] - one provider's try at the final answer

pub mod bundle;
pub mod normalize;
pub mod outcome;
pub mod phase;
pub mod synthesis;
