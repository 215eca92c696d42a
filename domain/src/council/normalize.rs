//! Normalization of raw provider generations.

/// Normalize a raw generation.
///
/// Some inference endpoints return the input followed by the completion. Any
/// leading echo of one of `echoes` is removed (longest match first), then the
/// result is trimmed.
pub fn normalize_generation(raw: &str, echoes: &[&str]) -> String {
    let mut text = raw.trim_start();

    let mut candidates: Vec<&str> = echoes
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    candidates.sort_by_key(|e| std::cmp::Reverse(e.len()));

    for echo in candidates {
        if let Some(rest) = text.strip_prefix(echo) {
            text = rest;
            break;
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_generation("  hello \n", &[]), "hello");
    }

    #[test]
    fn test_strips_prompt_echo() {
        let prompt = "Give me a plan.";
        let raw = "Give me a plan.\n\n1. Audit skills\n2. Build a portfolio";
        assert_eq!(
            normalize_generation(raw, &[prompt]),
            "1. Audit skills\n2. Build a portfolio"
        );
    }

    #[test]
    fn test_prefers_longest_echo() {
        let system = "You are the Analyst.";
        let rendered = "You are the Analyst.\n\nGive me a plan.";
        let raw = "You are the Analyst.\n\nGive me a plan. Step one.";
        assert_eq!(normalize_generation(raw, &[system, rendered]), "Step one.");
    }

    #[test]
    fn test_echo_only_becomes_empty() {
        assert_eq!(normalize_generation("Give me a plan.", &["Give me a plan."]), "");
    }

    #[test]
    fn test_non_prefix_echo_is_kept() {
        let raw = "Sure. Give me a plan.";
        assert_eq!(normalize_generation(raw, &["Give me a plan."]), raw);
    }
}
