//! Application layer for Astris
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilParams;
pub use ports::{
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    search_gateway::SearchGateway,
};
pub use use_cases::gather_council::FanOutCoordinator;
pub use use_cases::invoke::{SearchInvoker, SpecialistInvoker};
pub use use_cases::run_council::{Deliberation, DeliberationOrchestrator, RunCouncilError};
pub use use_cases::synthesize::{
    SynthesisError, SynthesisInvoker, SynthesisProvider, SynthesisResult,
};
