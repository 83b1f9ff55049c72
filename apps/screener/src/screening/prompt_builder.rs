use crate::llm_client::prompts::DECISION_CONTRACT;
use crate::llm_client::ChatMessage;
use crate::screening::prompts::{ASSESSMENT_SYSTEM_TEMPLATE, ASSESSMENT_USER_TEMPLATE};
use crate::screening::requirements::RequirementsProfile;

/// Builds the two-message assessment request: reviewer persona plus output
/// contract, then requirements and resume.
pub fn build_assessment_messages(
    profile: &RequirementsProfile,
    resume_text: &str,
) -> Vec<ChatMessage> {
    let areas = profile
        .assessment_areas
        .iter()
        .map(|area| format!("   - {area} assessment"))
        .collect::<Vec<_>>()
        .join("\n");

    let system = ASSESSMENT_SYSTEM_TEMPLATE
        .replace("{position}", &profile.position)
        .replace("{assessment_areas}", &areas)
        .replace("{decision_contract}", DECISION_CONTRACT);

    // Resume text goes in last so its content is never treated as a placeholder.
    let user = ASSESSMENT_USER_TEMPLATE
        .replace("{job_requirements}", &profile.requirements)
        .replace("{decision_contract}", DECISION_CONTRACT)
        .replace("{resume_text}", resume_text);

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
