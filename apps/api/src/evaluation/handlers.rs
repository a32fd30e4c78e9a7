//! Axum route handlers for the Resume Evaluation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::is_blank_resume;
use crate::evaluation::service::{evaluate_resume, EvaluationResponse};
use crate::models::evaluation::ResumeEvaluationRow;
use crate::routes::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub resume: Value,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl EvaluateRequest {
    fn validated(&self) -> Result<(&str, &Value), AppError> {
        let company = self.company.trim();
        if company.is_empty() || is_blank_resume(&self.resume) {
            return Err(AppError::Validation(
                "Company and resume are required".to_string(),
            ));
        }
        Ok((company, &self.resume))
    }
}

/// POST /api/ai-resume-evaluate
///
/// Returns the cached evaluation when this exact resume was already rated for the company.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let (company, resume) = request.validated()?;
    let response = evaluate_resume(
        state.evaluations.as_ref(),
        state.research.as_ref(),
        company,
        resume,
        false,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/ai-resume-evaluate/refresh
///
/// Drops any cached evaluation for the pair and regenerates it.
pub async fn handle_evaluate_refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let (company, resume) = request.validated()?;
    let response = evaluate_resume(
        state.evaluations.as_ref(),
        state.research.as_ref(),
        company,
        resume,
        true,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/resume-evaluations
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeEvaluationRow>>, AppError> {
    Ok(Json(state.evaluations.list_all().await?))
}

/// GET /api/resume-evaluations/:company
pub async fn handle_company_evaluations(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> Result<Json<Vec<ResumeEvaluationRow>>, AppError> {
    Ok(Json(
        state.evaluations.list_for_company(company.trim()).await?,
    ))
}

/// DELETE /api/resume-evaluations/:id
pub async fn handle_delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation(format!("Invalid evaluation id '{id}'")))?;

    if !state.evaluations.delete(id).await? {
        return Err(AppError::NotFound(
            "Resume evaluation not found".to_string(),
        ));
    }

    Ok(Json(DeleteResponse {
        message: "Resume evaluation deleted successfully".to_string(),
    }))
}
