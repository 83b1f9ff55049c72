//! Screening orchestrator — one sequential run per applicant:
//! extract → assess → notify, with early exit on extraction or assessment failure.
//!
//! `screen` always returns a `ScreeningOutcome`. Extraction and completion errors
//! become `success = false`; notification errors are logged and never change the
//! outcome of an assessment that already succeeded.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::llm_client::{CompletionClient, CompletionError};
use crate::screening::decision::parse_assessment;
use crate::screening::extractor::{ExtractionError, TextExtractor};
use crate::screening::models::{ApplicantData, AssessmentResult, ScreeningOutcome};
use crate::screening::notifier::{format_assessment_for_email, NotificationError, Notifier};
use crate::screening::prompt_builder::build_assessment_messages;
use crate::screening::requirements::RequirementsProfile;

/// Stage-level failures that abort a screening.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("Failed to extract text from resume: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Assessment failed: {0}")]
    Completion(#[from] CompletionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningStage {
    Extracting,
    Assessing,
    Notifying,
    Done,
}

impl fmt::Display for ScreeningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScreeningStage::Extracting => "extracting",
            ScreeningStage::Assessing => "assessing",
            ScreeningStage::Notifying => "notifying",
            ScreeningStage::Done => "done",
        };
        f.write_str(label)
    }
}

/// Wires the pipeline collaborators together. Holds no per-screening state.
pub struct Screener {
    extractor: Arc<dyn TextExtractor>,
    llm: Arc<dyn CompletionClient>,
    notifier: Arc<dyn Notifier>,
    profile: Arc<RequirementsProfile>,
    recruiter_email: String,
}

impl Screener {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn CompletionClient>,
        notifier: Arc<dyn Notifier>,
        profile: Arc<RequirementsProfile>,
        recruiter_email: String,
    ) -> Self {
        Self {
            extractor,
            llm,
            notifier,
            profile,
            recruiter_email,
        }
    }

    pub fn profile(&self) -> &RequirementsProfile {
        &self.profile
    }

    #[tracing::instrument(skip(self, applicant), fields(applicant = %applicant.name))]
    pub async fn screen(&self, applicant: &ApplicantData) -> ScreeningOutcome {
        let result = match self.assess(applicant).await {
            Ok(result) => result,
            Err(e) => {
                match &e {
                    ScreeningError::Extraction(inner) => {
                        error!(stage = %ScreeningStage::Extracting, "Resume extraction failed: {inner}")
                    }
                    ScreeningError::Completion(inner) => {
                        error!(stage = %ScreeningStage::Assessing, "Completion call failed: {inner}")
                    }
                }
                debug!(stage = %ScreeningStage::Done, success = false, "Screening finished");
                return ScreeningOutcome::failed(e.to_string());
            }
        };

        info!(
            qualified = result.meets_requirements,
            "Applicant {} assessed as {}",
            applicant.name,
            if result.meets_requirements { "qualified" } else { "not qualified" }
        );

        debug!(stage = %ScreeningStage::Notifying, "Sending notification");
        if let Err(e) = self.notify(applicant, &result).await {
            error!(stage = %ScreeningStage::Notifying, "Email sending failed for {}: {e}", applicant.name);
        }

        debug!(stage = %ScreeningStage::Done, success = true, "Screening finished");
        ScreeningOutcome::assessed(result)
    }

    async fn assess(&self, applicant: &ApplicantData) -> Result<AssessmentResult, ScreeningError> {
        debug!(stage = %ScreeningStage::Extracting, path = %applicant.resume_path, "Extracting resume text");
        let resume_text = self
            .extractor
            .extract(Path::new(&applicant.resume_path))
            .await?;

        debug!(stage = %ScreeningStage::Assessing, chars = resume_text.len(), "Requesting assessment");
        let messages = build_assessment_messages(&self.profile, &resume_text);
        let raw = self.llm.complete(&messages).await?;

        Ok(parse_assessment(&raw))
    }

    async fn notify(
        &self,
        applicant: &ApplicantData,
        result: &AssessmentResult,
    ) -> Result<(), NotificationError> {
        if result.meets_requirements {
            let formatted = format_assessment_for_email(&result.detailed_assessment);
            let status = self
                .notifier
                .forward_successful_applicant(&self.recruiter_email, applicant, &formatted)
                .await?;
            debug!(status, "Recruiter email sent");
        } else {
            let status = self
                .notifier
                .send_rejection(&applicant.email, &applicant.name)
                .await?;
            debug!(status, "Rejection email sent");
        }
        Ok(())
    }
}
