//! Infrastructure layer for Astris
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading
//! and assembly of the deliberation pipeline.

pub mod config;
pub mod council;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, Credentials, FileChainEntry, FileConfig, FileCouncilConfig,
    FileOutputConfig, FileProvidersConfig, FileServerConfig, FileSpecialistConfig,
    FileSynthesisConfig, ProviderRoute,
};
pub use council::CouncilFactory;
pub use providers::{ChatGateway, InferenceGateway, ProviderKind, WebSearchGateway, build_client};
