use serde::{Deserialize, Serialize};

/// One applicant as handed over by the upload layer. Immutable for the
/// duration of a screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantData {
    pub name: String,
    pub email: String,
    pub resume_path: String,
    pub position_applied: String,
}

/// The parsed verdict of a single assessment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub detailed_assessment: String,
    pub meets_requirements: bool,
    pub raw_response: String,
}

/// Uniform terminal record of one screening attempt.
///
/// Only constructed through `assessed` and `failed`, which keep the
/// success/error/assessment fields consistent with each other. Fields are
/// read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    success: bool,
    assessment: Option<String>,
    meets_requirements: Option<bool>,
    raw_response: String,
    error: Option<String>,
}

impl ScreeningOutcome {
    pub fn assessed(result: AssessmentResult) -> Self {
        Self {
            success: true,
            assessment: Some(result.detailed_assessment),
            meets_requirements: Some(result.meets_requirements),
            raw_response: result.raw_response,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            assessment: None,
            meets_requirements: None,
            raw_response: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn assessment(&self) -> Option<&str> {
        self.assessment.as_deref()
    }

    pub fn meets_requirements(&self) -> Option<bool> {
        self.meets_requirements
    }

    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True only when the assessment ran and confirmed the qualification.
    pub fn is_qualified(&self) -> bool {
        self.success && self.meets_requirements == Some(true)
    }
}

/// The only three messages an applicant ever sees. Raw error detail stays in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantMessage {
    PromisingQualifications,
    KeptOnFile,
    ProcessingIssue,
}

impl ApplicantMessage {
    pub fn for_outcome(outcome: &ScreeningOutcome) -> Self {
        match (outcome.success(), outcome.meets_requirements()) {
            (true, Some(true)) => ApplicantMessage::PromisingQualifications,
            (true, _) => ApplicantMessage::KeptOnFile,
            (false, _) => ApplicantMessage::ProcessingIssue,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            ApplicantMessage::PromisingQualifications => {
                "Thank you for applying! Your qualifications look promising, \
                 and our recruitment team will be in touch shortly."
            }
            ApplicantMessage::KeptOnFile => {
                "Thank you for your interest. We have carefully reviewed your application \
                 and will keep your resume on file for future opportunities."
            }
            ApplicantMessage::ProcessingIssue => {
                "We encountered an issue processing your application. \
                 Our team has been notified and will review it manually."
            }
        }
    }
}
