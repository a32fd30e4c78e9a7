//! In-memory stores and scripted fakes for unit and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::company_info::store::CompanyInfoStore;
use crate::evaluation::store::EvaluationStore;
use crate::llm_client::LlmError;
use crate::logo::{LogoError, LogoProvider};
use crate::models::company::{CompanyAiInfoRow, CompanyInfoUpdate, CompanyListingRow};
use crate::models::evaluation::{NewResumeEvaluation, ResumeEvaluationRow};
use crate::research::{ResearchAgent, ResumeAssessment};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Stores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCompanyStore {
    rows: Mutex<HashMap<String, CompanyAiInfoRow>>,
}

impl MemoryCompanyStore {
    pub fn seed(&self, company: &str, basic_info: &str, logo_url: Option<&str>, tags: &[&str]) {
        let row = CompanyAiInfoRow {
            id: Uuid::new_v4(),
            company: company.to_string(),
            basic_info: basic_info.to_string(),
            tech_jobs: format!("{company} cached tech"),
            summary: format!("{company} cached summary"),
            logo_url: logo_url.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            updated_at: Utc::now() - Duration::days(7),
        };
        self.rows.lock().unwrap().insert(company.to_string(), row);
    }
}

#[async_trait]
impl CompanyInfoStore for MemoryCompanyStore {
    async fn find(&self, company: &str) -> Result<Option<CompanyAiInfoRow>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(company).cloned())
    }

    async fn upsert(&self, update: CompanyInfoUpdate) -> Result<CompanyAiInfoRow, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .entry(update.company.clone())
            .or_insert_with(|| CompanyAiInfoRow {
                id: Uuid::new_v4(),
                company: update.company.clone(),
                basic_info: String::new(),
                tech_jobs: String::new(),
                summary: String::new(),
                logo_url: None,
                tags: Vec::new(),
                updated_at: Utc::now(),
            });
        row.basic_info = update.basic_info;
        row.tech_jobs = update.tech_jobs;
        row.summary = update.summary;
        if update.logo_url.is_some() {
            row.logo_url = update.logo_url;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn update_tags(
        &self,
        company: &str,
        tags: &[String],
    ) -> Result<Option<CompanyAiInfoRow>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(company).map(|row| {
            row.tags = tags.to_vec();
            row.clone()
        }))
    }

    async fn list(&self) -> Result<Vec<CompanyListingRow>, sqlx::Error> {
        let mut listing: Vec<CompanyListingRow> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|row| CompanyListingRow {
                company: row.company.clone(),
                tags: row.tags.clone(),
                logo_url: row.logo_url.clone(),
                summary: row.summary.clone(),
            })
            .collect();
        listing.sort_by(|a, b| a.company.cmp(&b.company));
        Ok(listing)
    }
}

#[derive(Default)]
pub struct MemoryEvaluationStore {
    rows: Mutex<Vec<ResumeEvaluationRow>>,
}

impl MemoryEvaluationStore {
    fn newest_first(mut rows: Vec<ResumeEvaluationRow>) -> Vec<ResumeEvaluationRow> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl EvaluationStore for MemoryEvaluationStore {
    async fn find(
        &self,
        company: &str,
        resume_hash: &str,
    ) -> Result<Option<ResumeEvaluationRow>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        let matching = rows
            .iter()
            .filter(|r| r.company == company && r.resume_hash == resume_hash)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching).into_iter().next())
    }

    async fn insert(
        &self,
        evaluation: NewResumeEvaluation,
    ) -> Result<ResumeEvaluationRow, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        // Strictly increasing timestamps keep newest-first ordering deterministic.
        let created_at = Utc::now() + Duration::milliseconds(rows.len() as i64);
        let row = ResumeEvaluationRow {
            id: Uuid::new_v4(),
            company: evaluation.company,
            resume: evaluation.resume,
            resume_hash: evaluation.resume_hash,
            qualifications: evaluation.qualifications,
            rating: evaluation.rating,
            advice: evaluation.advice,
            created_at,
            updated_at: created_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete_matching(&self, company: &str, resume_hash: &str) -> Result<u64, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.company == company && r.resume_hash == resume_hash));
        Ok((before - rows.len()) as u64)
    }

    async fn list_all(&self) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error> {
        Ok(Self::newest_first(self.rows.lock().unwrap().clone()))
    }

    async fn list_for_company(
        &self,
        company: &str,
    ) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        let matching = rows
            .iter()
            .filter(|r| r.company == company)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Research agent
// ────────────────────────────────────────────────────────────────────────────

/// Answers every prompt with `<company> ...` text, or fails every prompt.
#[derive(Default)]
pub struct FakeResearcher {
    basic_info: Option<String>,
    fail: bool,
    company_calls: AtomicUsize,
    evaluation_calls: AtomicUsize,
}

impl FakeResearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_basic_info(mut self, text: &str) -> Self {
        self.basic_info = Some(text.to_string());
        self
    }

    /// Number of basic-info, tech-jobs and summary prompts answered or failed.
    pub fn company_calls(&self) -> usize {
        self.company_calls.load(Ordering::SeqCst)
    }

    pub fn evaluation_calls(&self) -> usize {
        self.evaluation_calls.load(Ordering::SeqCst)
    }

    fn answer(&self, text: String) -> Result<String, LlmError> {
        self.company_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unavailable());
        }
        Ok(text)
    }
}

fn unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait]
impl ResearchAgent for FakeResearcher {
    async fn basic_info(&self, company: &str) -> Result<String, LlmError> {
        let text = self
            .basic_info
            .clone()
            .unwrap_or_else(|| format!("{company} basic info"));
        self.answer(text)
    }

    async fn tech_jobs(&self, company: &str) -> Result<String, LlmError> {
        self.answer(format!("{company} tech and jobs"))
    }

    async fn summary(&self, company: &str) -> Result<String, LlmError> {
        self.answer(format!("{company} summary"))
    }

    async fn evaluate_resume(
        &self,
        company: &str,
        _resume: &Value,
    ) -> Result<ResumeAssessment, LlmError> {
        self.evaluation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unavailable());
        }
        Ok(ResumeAssessment {
            qualifications: format!("{company} qualifications"),
            rating: "72% - solid backend match".to_string(),
            advice: "## 💡 Tips\n- Quantify impact".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Logo provider
// ────────────────────────────────────────────────────────────────────────────

enum LogoOutcome {
    Found(String),
    Missing,
    Failing,
}

/// Records every domain it is asked about.
pub struct FakeLogoProvider {
    outcome: LogoOutcome,
    requested: Mutex<Vec<String>>,
}

impl FakeLogoProvider {
    fn with(outcome: LogoOutcome) -> Self {
        Self {
            outcome,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(url: &str) -> Self {
        Self::with(LogoOutcome::Found(url.to_string()))
    }

    pub fn empty() -> Self {
        Self::with(LogoOutcome::Missing)
    }

    pub fn failing() -> Self {
        Self::with(LogoOutcome::Failing)
    }

    pub fn requested_domains(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogoProvider for FakeLogoProvider {
    async fn fetch_logo(&self, domain: &str) -> Result<Option<String>, LogoError> {
        self.requested.lock().unwrap().push(domain.to_string());
        match &self.outcome {
            LogoOutcome::Found(url) => Ok(Some(url.clone())),
            LogoOutcome::Missing => Ok(None),
            LogoOutcome::Failing => Err(LogoError::Api {
                status: 429,
                reason: "Too Many Requests".to_string(),
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

/// Handles to the fakes behind a test `AppState`.
pub struct TestApp {
    pub state: AppState,
    pub companies: Arc<MemoryCompanyStore>,
    pub evaluations: Arc<MemoryEvaluationStore>,
    pub research: Arc<FakeResearcher>,
    pub logos: Arc<FakeLogoProvider>,
}

impl TestApp {
    pub fn new(research: FakeResearcher, logos: FakeLogoProvider) -> Self {
        let companies = Arc::new(MemoryCompanyStore::default());
        let evaluations = Arc::new(MemoryEvaluationStore::default());
        let research = Arc::new(research);
        let logos = Arc::new(logos);

        let logo_provider: Arc<dyn LogoProvider> = logos.clone();
        let state = AppState {
            companies: companies.clone(),
            evaluations: evaluations.clone(),
            research: research.clone(),
            logos: Some(logo_provider),
        };

        Self {
            state,
            companies,
            evaluations,
            research,
            logos,
        }
    }
}
