//! Company research: the AI agent behind every generated company profile and
//! resume evaluation.
//!
//! `AppState` holds an `Arc<dyn ResearchAgent>`; production wires in
//! `PerplexityResearcher`, tests substitute a scripted fake.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::llm_client::prompts::NO_CITATIONS_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

pub mod handlers;
pub mod prompts;

use prompts::{
    ADVICE_PROMPT_TEMPLATE, BASIC_INFO_PROMPT_TEMPLATE, QUALIFICATIONS_PROMPT_TEMPLATE,
    RATING_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE, TECH_JOBS_PROMPT_TEMPLATE,
};

/// Matches `[1]`, `[2, 3]` and the whitespace before them.
static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[\d+(?:\s*,\s*\d+)*\]").expect("Invalid regex pattern"));

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(company|qualifications|resume)\}").expect("Invalid regex pattern")
});

/// Output of a resume evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeAssessment {
    pub qualifications: String,
    pub rating: String,
    pub advice: String,
}

/// The research agent trait. Implement this to swap AI backends without
/// touching the cache or handler code.
#[async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Headquarters, founding, size, website and a short description.
    async fn basic_info(&self, company: &str) -> Result<String, LlmError>;

    /// Technology stack and hiring information.
    async fn tech_jobs(&self, company: &str) -> Result<String, LlmError>;

    async fn summary(&self, company: &str) -> Result<String, LlmError>;

    async fn evaluate_resume(
        &self,
        company: &str,
        resume: &Value,
    ) -> Result<ResumeAssessment, LlmError>;
}

/// Research agent backed by Perplexity through the shared `LlmClient`.
pub struct PerplexityResearcher {
    llm: LlmClient,
}

impl PerplexityResearcher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn ask(&self, prompt: String) -> Result<String, LlmError> {
        let text = self.llm.call_text(&prompt).await?;
        debug!("Research answer: {} chars", text.len());
        Ok(strip_citation_markers(&text))
    }
}

#[async_trait]
impl ResearchAgent for PerplexityResearcher {
    async fn basic_info(&self, company: &str) -> Result<String, LlmError> {
        self.ask(company_prompt(BASIC_INFO_PROMPT_TEMPLATE, company))
            .await
    }

    async fn tech_jobs(&self, company: &str) -> Result<String, LlmError> {
        self.ask(company_prompt(TECH_JOBS_PROMPT_TEMPLATE, company))
            .await
    }

    async fn summary(&self, company: &str) -> Result<String, LlmError> {
        self.ask(company_prompt(SUMMARY_PROMPT_TEMPLATE, company))
            .await
    }

    /// Qualifications first; rating and advice both build on them and run concurrently.
    async fn evaluate_resume(
        &self,
        company: &str,
        resume: &Value,
    ) -> Result<ResumeAssessment, LlmError> {
        info!("Evaluating resume against {company}");

        let qualifications = self
            .ask(company_prompt(QUALIFICATIONS_PROMPT_TEMPLATE, company))
            .await?;

        let resume_text = serde_json::to_string_pretty(resume)?;
        let rating_prompt = evaluation_prompt(
            RATING_PROMPT_TEMPLATE,
            company,
            &qualifications,
            &resume_text,
        );
        let advice_prompt = evaluation_prompt(
            ADVICE_PROMPT_TEMPLATE,
            company,
            &qualifications,
            &resume_text,
        );

        let (rating, advice) = tokio::try_join!(self.ask(rating_prompt), self.ask(advice_prompt))?;

        Ok(ResumeAssessment {
            qualifications,
            rating,
            advice,
        })
    }
}

fn company_prompt(template: &str, company: &str) -> String {
    format!(
        "{} {}",
        template.replace("{company}", company),
        NO_CITATIONS_INSTRUCTION
    )
}

/// Fills every placeholder in one pass, so placeholder text inside the inserted
/// values is left as typed.
fn evaluation_prompt(template: &str, company: &str, qualifications: &str, resume: &str) -> String {
    let filled = PLACEHOLDER.replace_all(template, |caps: &Captures| match &caps[1] {
        "company" => company.to_string(),
        "qualifications" => qualifications.to_string(),
        _ => resume.to_string(),
    });
    format!("{filled} {NO_CITATIONS_INSTRUCTION}")
}

/// Removes numeric citation markers the model emits despite being told not to.
pub fn strip_citation_markers(text: &str) -> String {
    CITATION_MARKER.replace_all(text, "").trim().to_string()
}
