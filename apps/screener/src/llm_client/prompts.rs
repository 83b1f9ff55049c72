// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces more than one prompt repeats verbatim.

/// The literal marker separating the narrative assessment from the verdict.
pub const DECISION_MARKER: &str = "OVERALL_DECISION:";

/// Closing instruction that pins the final line of every assessment response.
pub const DECISION_CONTRACT: &str = "\
OVERALL_DECISION: qualified
or
OVERALL_DECISION: not_qualified";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_lines_start_with_marker() {
        let verdict_lines: Vec<&str> = DECISION_CONTRACT
            .lines()
            .filter(|line| *line != "or")
            .collect();
        assert_eq!(verdict_lines.len(), 2);
        assert!(verdict_lines.iter().all(|l| l.starts_with(DECISION_MARKER)));
    }
}
