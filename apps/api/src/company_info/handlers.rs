//! Axum route handlers for the Company AI Info API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::company_info::service::{resolve_company_info, CompanyInfoResponse};
use crate::errors::AppError;
use crate::models::company::{CompanyAiInfoRow, CompanyListingRow};
use crate::routes::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyInfoRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct TagsRequest {
    #[serde(default)]
    pub tags: Option<Value>,
}

/// POST /api/company-ai-info
///
/// Cached company profile. `refresh: true` re-runs the research prompts.
pub async fn handle_company_ai_info(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompanyInfoRequest>,
) -> Result<Json<CompanyInfoResponse>, AppError> {
    let company = request.company.trim();
    if company.is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let response = resolve_company_info(
        state.companies.as_ref(),
        state.research.as_ref(),
        state.logos.as_deref(),
        company,
        request.refresh,
    )
    .await?;

    Ok(Json(response))
}

/// PUT /api/company-ai-info/:company/tags
pub async fn handle_update_tags(
    State(state): State<AppState>,
    Path(company): Path<String>,
    ApiJson(request): ApiJson<TagsRequest>,
) -> Result<Json<CompanyAiInfoRow>, AppError> {
    let tags = parse_tags(request.tags)?;

    let updated = state
        .companies
        .update_tags(company.trim(), &tags)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    Ok(Json(updated))
}

/// GET /api/company-ai-info
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyListingRow>>, AppError> {
    Ok(Json(state.companies.list().await?))
}

/// Accepts only a JSON array of strings.
fn parse_tags(tags: Option<Value>) -> Result<Vec<String>, AppError> {
    let invalid = || AppError::Validation("tags must be an array".to_string());

    match tags {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(tag) => Ok(tag),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}
