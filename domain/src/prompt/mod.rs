//! Prompt domain
//!
//! Templates for every remote call made during a deliberation.

mod template;

pub use template::{PromptTemplate, missing_input_marker};
