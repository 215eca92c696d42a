//! Console output formatter for deliberations

use crate::output::formatter::OutputFormatter;
use astris_application::Deliberation;
use astris_domain::{AttemptOutcome, SpecialistResult};
use colored::Colorize;

/// Formats deliberations for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors off (or back on) for every formatter
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete deliberation
    pub fn format(deliberation: &Deliberation) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Council Deliberation"));
        output.push('\n');

        // Question
        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            deliberation.query.content()
        ));

        // Council
        output.push_str(&Self::section_header("Council"));
        for (role, result) in deliberation.bundle.specialists() {
            output.push_str(&Self::branch(role.council_name(), result));
        }
        output.push_str(&Self::branch("Web Search", deliberation.bundle.research()));

        // Synthesis
        output.push_str(&Self::section_header("Synthesis"));
        for (i, attempt) in deliberation.attempts.iter().enumerate() {
            let status = match &attempt.outcome {
                AttemptOutcome::Success { .. } => "accepted".green().to_string(),
                other => format!(
                    "{} ({})",
                    other.label().red(),
                    other.reason().unwrap_or("unknown")
                ),
            };
            output.push_str(&format!("  {}. {} - {}\n", i + 1, attempt.provider, status));
        }

        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Lead councillor: {}", deliberation.provider)
                .yellow()
                .bold(),
            deliberation.response
        ));

        output.push_str(&format!(
            "\n{}\n",
            format!("Completed in {} ms", deliberation.elapsed_ms).dimmed()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(deliberation: &Deliberation) -> String {
        serde_json::to_string_pretty(deliberation).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_synthesis_only(deliberation: &Deliberation) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Council Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Q:".bold(),
            deliberation.query.content()
        ));

        output.push_str(&format!(
            "{} {}/{}\n\n",
            "Councillors heard:".dimmed(),
            deliberation.bundle.successful_specialists(),
            deliberation.bundle.len()
        ));

        output.push_str(&deliberation.response);
        output.push('\n');

        output
    }

    fn branch(name: &str, result: &SpecialistResult) -> String {
        match result {
            SpecialistResult::Success { text } => format!(
                "\n{}\n{}\n",
                format!("── {} ──", name).yellow().bold(),
                text
            ),
            SpecialistResult::Degraded {
                placeholder,
                reason,
            } => format!(
                "\n{}\n{}\n",
                format!("── {} (degraded: {}) ──", name, reason).yellow(),
                placeholder
            ),
            SpecialistResult::Failure { reason } => format!(
                "\n{}\nError: {}\n",
                format!("── {} ──", name).red().bold(),
                reason
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, deliberation: &Deliberation) -> String {
        Self::format(deliberation)
    }

    fn format_json(&self, deliberation: &Deliberation) -> String {
        Self::format_json(deliberation)
    }

    fn format_synthesis_only(&self, deliberation: &Deliberation) -> String {
        Self::format_synthesis_only(deliberation)
    }
}
