//! Persistence of applicants and their screening results.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::applicant::{ApplicantRow, ScreeningResultRow};
use crate::screening::models::{ApplicantData, ScreeningOutcome};

pub async fn insert_applicant(pool: &PgPool, applicant: &ApplicantData) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO applicants (id, name, email, resume_path, position_applied)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(&applicant.name)
    .bind(&applicant.email)
    .bind(&applicant.resume_path)
    .bind(&applicant.position_applied)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Appends the outcome of one screening attempt. Results are never updated in place.
pub async fn store_screening_outcome(
    pool: &PgPool,
    applicant_id: Uuid,
    outcome: &ScreeningOutcome,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO screening_results
            (id, applicant_id, success, assessment, meets_requirements, raw_response, error)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(applicant_id)
    .bind(outcome.success())
    .bind(outcome.assessment())
    .bind(outcome.meets_requirements())
    .bind(outcome.raw_response())
    .bind(outcome.error())
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_applicant(pool: &PgPool, id: Uuid) -> Result<Option<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>("SELECT * FROM applicants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_latest_screening(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<Option<ScreeningResultRow>, sqlx::Error> {
    sqlx::query_as::<_, ScreeningResultRow>(
        "SELECT * FROM screening_results WHERE applicant_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(applicant_id)
    .fetch_optional(pool)
    .await
}
