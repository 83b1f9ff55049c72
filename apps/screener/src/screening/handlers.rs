//! Axum route handlers for the Applications API.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{Multipart, Path, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::{ApplicantRow, ScreeningResultRow};
use crate::screening::models::{ApplicantData, ApplicantMessage, ScreeningOutcome};
use crate::screening::repository::{
    get_applicant, get_latest_screening, insert_applicant, store_screening_outcome,
};
use crate::screening::validation::{sanitize_file_name, validate_upload};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct UploadForm {
    name: String,
    email: String,
    position_applied: Option<String>,
    file_name: String,
    file: Bytes,
}

/// What the applicant gets back. Carries no identifiers and no error detail.
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub status: ApplicantMessage,
    pub message: &'static str,
}

impl ApplicationResponse {
    pub fn for_outcome(outcome: &ScreeningOutcome) -> Self {
        let status = ApplicantMessage::for_outcome(outcome);
        Self {
            status,
            message: status.text(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationDetailResponse {
    pub applicant: ApplicantRow,
    pub screening: Option<ScreeningResultRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Multipart upload (`name`, `email`, `resume`, optional `position_applied`).
/// Stores the resume, screens it within the request and answers with one of the
/// three applicant-facing messages.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationResponse>, AppError> {
    let form = read_upload_form(&mut multipart).await?;

    let errors = validate_upload(&form.name, &form.email, &form.file_name, form.file.len());
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.reason))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::Validation(message));
    }

    let resume_path = save_resume(&state.config.upload_dir, &form.file_name, &form.file).await?;

    let applicant = ApplicantData {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        resume_path: resume_path.display().to_string(),
        position_applied: form
            .position_applied
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| state.screener.profile().position.clone()),
    };

    let application_id = match insert_applicant(&state.db, &applicant).await {
        Ok(id) => id,
        Err(e) => {
            discard_resume(&resume_path).await;
            return Err(e.into());
        }
    };
    info!("Resume uploaded successfully for {}", applicant.name);

    let outcome = state.screener.screen(&applicant).await;
    info!(
        success = outcome.success(),
        qualified = outcome.is_qualified(),
        "Screening complete for application {application_id}"
    );

    if let Err(e) = store_screening_outcome(&state.db, application_id, &outcome).await {
        error!("Failed to store assessment results for {application_id}: {e}");
    }

    Ok(Json(ApplicationResponse::for_outcome(&outcome)))
}

/// GET /api/v1/applications/:id
///
/// Operator view of a stored application and its latest screening result.
/// Requires `Authorization: Bearer <OPERATOR_TOKEN>`.
pub async fn handle_get_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationDetailResponse>, AppError> {
    authorize_operator(&headers, state.config.operator_token.as_deref())?;

    let applicant = get_applicant(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    let screening = get_latest_screening(&state.db, application_id).await?;

    Ok(Json(ApplicationDetailResponse {
        applicant,
        screening,
    }))
}

/// Fails unless the request carries the configured operator token.
/// An unset token disables the operator view entirely.
fn authorize_operator(headers: &HeaderMap, operator_token: Option<&str>) -> Result<(), AppError> {
    let expected = operator_token.ok_or(AppError::Unauthorized)?;
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if tokens_match(presented.trim().as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.len() == expected.len()
        && presented
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = read_text(field).await?,
            "email" => form.email = read_text(field).await?,
            "position_applied" => form.position_applied = Some(read_text(field).await?),
            "resume" => {
                form.file_name = field.file_name().unwrap_or_default().to_string();
                form.file = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed resume upload: {e}")))?;
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form field: {e}")))
}

/// Writes the resume under `{upload_dir}/resumes/` with a unique prefix.
async fn save_resume(upload_dir: &str, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    let dir = FsPath::new(upload_dir).join("resumes");
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name)));
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

/// Removes a stored resume whose applicant record could not be written.
async fn discard_resume(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove orphaned resume {}: {e}", path.display());
    }
}
