//! Output formatter trait

use astris_application::Deliberation;

/// Trait for formatting deliberations
pub trait OutputFormatter {
    /// Format the complete deliberation
    fn format(&self, deliberation: &Deliberation) -> String;

    /// Format as JSON
    fn format_json(&self, deliberation: &Deliberation) -> String;

    /// Format the answer only (concise output)
    fn format_synthesis_only(&self, deliberation: &Deliberation) -> String;
}
