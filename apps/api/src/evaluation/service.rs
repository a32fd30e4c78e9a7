//! Resume evaluation: cached per (company, resume hash).
//!
//! Flow: hash resume → cache lookup → (miss or refresh) ResearchAgent::evaluate_resume →
//!       persist → respond with `cached` telling the caller which path was taken.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::resume_hash;
use crate::evaluation::store::EvaluationStore;
use crate::models::evaluation::{NewResumeEvaluation, ResumeEvaluationRow};
use crate::research::ResearchAgent;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub company: String,
    pub qualifications: String,
    pub rating: String,
    pub advice: String,
    pub cached: bool,
    pub created_at: DateTime<Utc>,
}

impl EvaluationResponse {
    fn from_row(row: ResumeEvaluationRow, cached: bool) -> Self {
        Self {
            company: row.company,
            qualifications: row.qualifications,
            rating: row.rating,
            advice: row.advice,
            cached,
            created_at: row.created_at,
        }
    }
}

/// Returns the cached evaluation for this resume and company, generating one
/// on a miss. `force_refresh` drops the cached evaluation and regenerates.
pub async fn evaluate_resume(
    store: &dyn EvaluationStore,
    research: &dyn ResearchAgent,
    company: &str,
    resume: &Value,
    force_refresh: bool,
) -> Result<EvaluationResponse, AppError> {
    let hash = resume_hash(resume);

    if force_refresh {
        let removed = store.delete_matching(company, &hash).await?;
        info!("Refreshing evaluation for {company}: dropped {removed} cached");
    } else if let Some(row) = store.find(company, &hash).await? {
        info!("Serving cached evaluation for {company} ({hash})");
        return Ok(EvaluationResponse::from_row(row, true));
    }

    let assessment = research.evaluate_resume(company, resume).await?;

    let row = store
        .insert(NewResumeEvaluation {
            company: company.to_string(),
            resume: resume.clone(),
            resume_hash: hash,
            qualifications: assessment.qualifications,
            rating: assessment.rating,
            advice: assessment.advice,
        })
        .await?;

    Ok(EvaluationResponse::from_row(row, false))
}
