use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEvaluationRow {
    pub id: Uuid,
    pub company: String,
    pub resume: Value,
    pub resume_hash: String,
    pub qualifications: String,
    pub rating: String,
    pub advice: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResumeEvaluation {
    pub company: String,
    pub resume: Value,
    pub resume_hash: String,
    pub qualifications: String,
    pub rating: String,
    pub advice: String,
}
