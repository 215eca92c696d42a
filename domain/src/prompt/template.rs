//! Prompt templates for the council flow

use crate::core::role::Role;
use crate::council::bundle::ResultBundle;
use crate::council::outcome::SpecialistResult;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a specialist councillor
    pub fn specialist_system(role: Role) -> &'static str {
        match role {
            Role::EmotionalAssessment => {
                r#"You are The Empath, a member of an advisory council.
Your task is to acknowledge how the person is feeling about their situation.
Name the emotions you sense, validate them, and remind them that their well-being matters.
Do not give practical advice; other councillors handle that. Keep it to a short paragraph."#
            }
            Role::ContextualResearch => {
                r#"You are The Chronicler, a member of an advisory council.
Your task is to describe the current landscape relevant to the person's situation:
trends, market conditions, tools, and what has changed recently.
Be factual and specific. Keep it to a short paragraph."#
            }
            Role::ActionPlanning => {
                r#"You are The Analyst, a member of an advisory council.
Your task is to turn the person's situation into a concrete, numbered plan of at most five steps.
Each step must be actionable. Do not discuss feelings or risks."#
            }
            Role::RiskAssessment => {
                r#"You are The Sentinel, a member of an advisory council.
Your task is to point out the main risks, pitfalls, and things to be cautious about
in the person's situation, and one mitigation for each. Keep it to a short list."#
            }
        }
    }

    /// User prompt for a specialist councillor
    pub fn specialist_prompt(role: Role, query: &str) -> String {
        format!(
            r#"A person has brought this to the council:

{}

Respond as {} only."#,
            query,
            role.council_name()
        )
    }

    /// Query sent to the search provider
    pub fn search_query(query: &str) -> String {
        format!("Latest developments and context relevant to: {}", query)
    }

    /// System prompt for the lead councillor
    pub fn synthesis_system() -> &'static str {
        r#"You are the Lead Councillor, speaking for an advisory council.
Your task is to merge the councillors' contributions into one warm, coherent reply:
1. Open with emotional validation
2. Give the relevant context
3. Lay out the stepwise plan
4. Close with the cautions worth keeping in mind

Use only the material provided. Some councillors may be marked as having no input;
never invent what they might have said."#
    }

    /// User prompt for the lead councillor, built from the full bundle
    pub fn synthesis_prompt(query: &str, bundle: &ResultBundle) -> String {
        let mut prompt = format!(
            r#"The person asked:

{}

Research context:
"#,
            query
        );

        prompt.push_str(&Self::render_entry("Research", bundle.research()));
        prompt.push_str("\n\nCouncil contributions:\n");

        for (role, result) in bundle.specialists() {
            prompt.push_str(&format!("\n--- {} ---\n", role.council_name()));
            prompt.push_str(&Self::render_entry(role.council_name(), result));
            prompt.push('\n');
        }

        prompt.push_str(
            r#"
Write the council's single reply to the person now. Entries marked NO INPUT carry no
information; skip them rather than filling the gap."#,
        );

        prompt
    }

    fn render_entry(source: &str, result: &SpecialistResult) -> String {
        match result {
            SpecialistResult::Success { text } => text.clone(),
            SpecialistResult::Degraded {
                placeholder,
                reason,
            } => format!(
                "{} {}",
                missing_input_marker(source, "degraded", reason),
                placeholder
            ),
            SpecialistResult::Failure { reason } => missing_input_marker(source, "failed", reason),
        }
    }
}

/// Visible marker for a branch that contributed nothing
pub fn missing_input_marker(source: &str, status: &str, reason: &str) -> String {
    format!("[NO INPUT: {} {}: {}]", source, status, reason)
}
