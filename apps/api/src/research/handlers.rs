//! Axum route handlers for the single-prompt research endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::routes::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    #[serde(default)]
    pub company: String,
}

impl CompanyRequest {
    /// Returns the trimmed company name, rejecting blank input.
    pub fn company_name(&self) -> Result<&str, AppError> {
        let company = self.company.trim();
        if company.is_empty() {
            return Err(AppError::Validation("Company name is required".to_string()));
        }
        Ok(company)
    }
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub company: String,
    pub sources: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub company: String,
    pub info: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub company: String,
    pub summary: String,
}

/// POST /api/ai-company-sources
///
/// Basic factual profile of the company. Uncached.
pub async fn handle_company_sources(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<Json<SourcesResponse>, AppError> {
    let company = request.company_name()?;
    let sources = state.research.basic_info(company).await?;
    Ok(Json(SourcesResponse {
        company: company.to_string(),
        sources,
    }))
}

/// POST /api/ai-company-info
///
/// Technology stack and job opportunities. Uncached.
pub async fn handle_company_info(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<Json<InfoResponse>, AppError> {
    let company = request.company_name()?;
    let info = state.research.tech_jobs(company).await?;
    Ok(Json(InfoResponse {
        company: company.to_string(),
        info,
    }))
}

/// POST /api/ai-company-summary
pub async fn handle_company_summary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let company = request.company_name()?;
    let summary = state.research.summary(company).await?;
    Ok(Json(SummaryResponse {
        company: company.to_string(),
        summary,
    }))
}
