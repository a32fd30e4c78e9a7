use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cached AI research for one company. `company` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAiInfoRow {
    pub id: Uuid,
    pub company: String,
    pub basic_info: String,
    pub tech_jobs: String,
    pub summary: String,
    pub logo_url: Option<String>,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Projection served by the company listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListingRow {
    pub company: String,
    pub tags: Vec<String>,
    pub logo_url: Option<String>,
    pub summary: String,
}

/// Fields written by a research refresh. `logo_url: None` keeps whatever logo is stored.
#[derive(Debug, Clone)]
pub struct CompanyInfoUpdate {
    pub company: String,
    pub basic_info: String,
    pub tech_jobs: String,
    pub summary: String,
    pub logo_url: Option<String>,
}
