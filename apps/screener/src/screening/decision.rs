//! Decision parser — splits a raw assessment into narrative and verdict.
//!
//! Never fails. Anything that is not an explicit `qualified` verdict degrades to
//! `meets_requirements = false`.

use tracing::warn;

use crate::llm_client::prompts::DECISION_MARKER;
use crate::screening::models::AssessmentResult;

pub const MISSING_MARKER_ASSESSMENT: &str = "Error: Assessment response missing required format";
pub const INVALID_FORMAT_ASSESSMENT: &str = "Error: Invalid assessment format";

const QUALIFIED_VERDICT: &str = "qualified";

pub fn parse_assessment(raw: &str) -> AssessmentResult {
    if !raw.contains(DECISION_MARKER) {
        warn!("Assessment response has no decision marker");
        return malformed(MISSING_MARKER_ASSESSMENT, raw);
    }

    // A marker repeated inside the narrative yields more than two segments and is
    // rejected as malformed rather than guessing which occurrence is the verdict.
    let segments: Vec<&str> = raw.split(DECISION_MARKER).collect();
    let [narrative, verdict] = segments.as_slice() else {
        warn!(
            markers = segments.len() - 1,
            "Assessment response has more than one decision marker"
        );
        return malformed(INVALID_FORMAT_ASSESSMENT, raw);
    };

    AssessmentResult {
        detailed_assessment: narrative.trim().to_string(),
        meets_requirements: verdict.trim().to_lowercase() == QUALIFIED_VERDICT,
        raw_response: raw.to_string(),
    }
}

fn malformed(diagnostic: &str, raw: &str) -> AssessmentResult {
    AssessmentResult {
        detailed_assessment: diagnostic.to_string(),
        meets_requirements: false,
        raw_response: raw.to_string(),
    }
}
