use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub resume_path: String,
    pub position_applied: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScreeningResultRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub success: bool,
    pub assessment: Option<String>,
    pub meets_requirements: Option<bool>,
    pub raw_response: String,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}
