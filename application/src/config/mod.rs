//! Application-level configuration.
//!
//! - [`CouncilParams`] - per-class timeouts and generation parameters

pub mod council_params;

pub use council_params::CouncilParams;
