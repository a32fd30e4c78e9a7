//! Company enrichment: the cached research flow behind `POST /api/company-ai-info`.
//!
//! Flow: cache lookup → (miss or refresh) three research prompts concurrently →
//!       website extraction → logo lookup when none is cached → upsert → respond.
//!
//! A cached record is served as-is unless `refresh` is set; the AI is never
//! prompted on a plain cache hit.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::company_info::domain::{construct_domain_from_company, extract_valid_domain};
use crate::company_info::store::CompanyInfoStore;
use crate::errors::AppError;
use crate::logo::LogoProvider;
use crate::models::company::{CompanyAiInfoRow, CompanyInfoUpdate};
use crate::research::ResearchAgent;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoResponse {
    pub company: String,
    pub basic_info: String,
    pub tech_jobs: String,
    pub summary: String,
    /// Empty when no logo is known.
    pub logo_url: String,
    /// Host extracted from `basic_info`, empty when none was found.
    pub website: String,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl CompanyInfoResponse {
    fn from_cached(company: &str, row: &CompanyAiInfoRow) -> Self {
        Self {
            company: company.to_string(),
            basic_info: row.basic_info.clone(),
            tech_jobs: row.tech_jobs.clone(),
            summary: row.summary.clone(),
            logo_url: row.logo_url.clone().unwrap_or_default(),
            website: extract_valid_domain(&row.basic_info).unwrap_or_default(),
            updated_at: row.updated_at,
            tags: row.tags.clone(),
        }
    }
}

struct ResearchFields {
    basic_info: String,
    tech_jobs: String,
    summary: String,
}

/// Returns cached research for `company`, or researches it (and refreshes the
/// cache) on a miss or when `refresh` is set.
///
/// Research failure falls back to the cached fields when a record exists; with
/// nothing cached the error propagates.
pub async fn resolve_company_info(
    store: &dyn CompanyInfoStore,
    research: &dyn ResearchAgent,
    logos: Option<&dyn LogoProvider>,
    company: &str,
    refresh: bool,
) -> Result<CompanyInfoResponse, AppError> {
    let cached = store.find(company).await?;

    if let Some(row) = &cached {
        if !refresh {
            info!("Serving cached research for {company}");
            return Ok(CompanyInfoResponse::from_cached(company, row));
        }
    }

    info!(
        "Researching {company} ({})",
        if cached.is_some() { "refresh" } else { "cache miss" }
    );

    let fields = match tokio::try_join!(
        research.basic_info(company),
        research.tech_jobs(company),
        research.summary(company),
    ) {
        Ok((basic_info, tech_jobs, summary)) => ResearchFields {
            basic_info,
            tech_jobs,
            summary,
        },
        Err(e) => match &cached {
            Some(row) => {
                error!("Error fetching AI data for {company}, keeping cached fields: {e}");
                ResearchFields {
                    basic_info: row.basic_info.clone(),
                    tech_jobs: row.tech_jobs.clone(),
                    summary: row.summary.clone(),
                }
            }
            None => return Err(e.into()),
        },
    };

    let website = extract_valid_domain(&fields.basic_info).unwrap_or_default();

    let cached_logo = cached
        .as_ref()
        .and_then(|row| row.logo_url.as_deref())
        .filter(|url| !url.is_empty());

    let fetched_logo = match cached_logo {
        Some(_) => {
            debug!("Using cached logo for {company}");
            None
        }
        None => {
            let cached_basic_info = cached.as_ref().map(|row| row.basic_info.as_str());
            fetch_logo(logos, company, &fields.basic_info, cached_basic_info).await
        }
    };

    let row = store
        .upsert(CompanyInfoUpdate {
            company: company.to_string(),
            basic_info: fields.basic_info.clone(),
            tech_jobs: fields.tech_jobs.clone(),
            summary: fields.summary.clone(),
            logo_url: fetched_logo,
        })
        .await?;

    Ok(CompanyInfoResponse {
        company: company.to_string(),
        basic_info: fields.basic_info,
        tech_jobs: fields.tech_jobs,
        summary: fields.summary,
        logo_url: row.logo_url.unwrap_or_default(),
        website,
        updated_at: row.updated_at,
        tags: row.tags,
    })
}

/// Picks the domain to look up: freshly researched text, then the cached text,
/// then a guess from the company name.
pub fn logo_domain(
    company: &str,
    basic_info: &str,
    cached_basic_info: Option<&str>,
) -> Option<String> {
    extract_valid_domain(basic_info)
        .or_else(|| cached_basic_info.and_then(extract_valid_domain))
        .or_else(|| {
            debug!("No domain found in text, constructing from company name: {company}");
            construct_domain_from_company(company)
        })
}

/// Logo lookup failures never fail the request.
async fn fetch_logo(
    logos: Option<&dyn LogoProvider>,
    company: &str,
    basic_info: &str,
    cached_basic_info: Option<&str>,
) -> Option<String> {
    let Some(domain) = logo_domain(company, basic_info, cached_basic_info) else {
        info!("No valid domain found for company: {company}");
        return None;
    };

    let Some(logos) = logos else {
        debug!("Logo provider not configured, skipping {domain}");
        return None;
    };

    match logos.fetch_logo(&domain).await {
        Ok(Some(url)) => {
            info!("Fetched logo for {domain}");
            Some(url)
        }
        Ok(None) => {
            info!("No logos found for domain: {domain}");
            None
        }
        Err(e) => {
            warn!("Logo lookup failed for {domain}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeLogoProvider, FakeResearcher, MemoryCompanyStore};

    const ACME_BASIC: &str = "- Founded: 1949\n- Website: https://www.acme.com\n- HQ: Desert";

    #[test]
    fn test_logo_domain_prefers_fresh_text() {
        assert_eq!(
            logo_domain("Acme", ACME_BASIC, Some("Website: https://old.acme.net")).as_deref(),
            Some("www.acme.com")
        );
    }

    #[test]
    fn test_logo_domain_falls_back_to_cached_text() {
        assert_eq!(
            logo_domain("Acme", "no links here", Some("Website: https://old.acme.net")).as_deref(),
            Some("old.acme.net")
        );
    }

    #[test]
    fn test_logo_domain_falls_back_to_company_name() {
        assert_eq!(
            logo_domain("Acme Corp", "no links here", None).as_deref(),
            Some("acmecorp.com")
        );
    }

    #[tokio::test]
    async fn test_cache_miss_researches_and_persists() {
        let store = MemoryCompanyStore::default();
        let research = FakeResearcher::new().with_basic_info(ACME_BASIC);
        let logos = FakeLogoProvider::returning("https://cdn.example/acme.svg");

        let response = resolve_company_info(&store, &research, Some(&logos), "Acme", false)
            .await
            .unwrap();

        assert_eq!(research.company_calls(), 3);
        assert_eq!(response.basic_info, ACME_BASIC);
        assert_eq!(response.tech_jobs, "Acme tech and jobs");
        assert_eq!(response.summary, "Acme summary");
        assert_eq!(response.website, "www.acme.com");
        assert_eq!(response.logo_url, "https://cdn.example/acme.svg");
        assert_eq!(logos.requested_domains(), vec!["www.acme.com".to_string()]);

        let stored = store.find("Acme").await.unwrap().unwrap();
        assert_eq!(stored.summary, "Acme summary");
        assert_eq!(stored.logo_url.as_deref(), Some("https://cdn.example/acme.svg"));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_research_and_logo() {
        let store = MemoryCompanyStore::default();
        store.seed("Acme", ACME_BASIC, Some("https://cdn.example/cached.svg"), &["target"]);
        let research = FakeResearcher::new();
        let logos = FakeLogoProvider::returning("https://cdn.example/new.svg");

        let response = resolve_company_info(&store, &research, Some(&logos), "Acme", false)
            .await
            .unwrap();

        assert_eq!(research.company_calls(), 0);
        assert!(logos.requested_domains().is_empty());
        assert_eq!(response.basic_info, ACME_BASIC);
        assert_eq!(response.website, "www.acme.com");
        assert_eq!(response.logo_url, "https://cdn.example/cached.svg");
        assert_eq!(response.tags, vec!["target".to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_reresearches_but_keeps_cached_logo() {
        let store = MemoryCompanyStore::default();
        store.seed("Acme", "old text", Some("https://cdn.example/cached.svg"), &["target"]);
        let research = FakeResearcher::new().with_basic_info(ACME_BASIC);
        let logos = FakeLogoProvider::returning("https://cdn.example/new.svg");

        let response = resolve_company_info(&store, &research, Some(&logos), "Acme", true)
            .await
            .unwrap();

        assert_eq!(research.company_calls(), 3);
        assert_eq!(response.basic_info, ACME_BASIC);
        assert_eq!(response.logo_url, "https://cdn.example/cached.svg");
        assert!(logos.requested_domains().is_empty());
        assert_eq!(response.tags, vec!["target".to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_failure_falls_back_to_cache() {
        let store = MemoryCompanyStore::default();
        store.seed("Acme", ACME_BASIC, None, &[]);
        let research = FakeResearcher::failing();

        let response = resolve_company_info(&store, &research, None, "Acme", true)
            .await
            .unwrap();

        assert_eq!(response.basic_info, ACME_BASIC);
        assert_eq!(response.website, "www.acme.com");
        assert_eq!(response.logo_url, "");
    }

    #[tokio::test]
    async fn test_miss_with_research_failure_is_an_error() {
        let store = MemoryCompanyStore::default();
        let research = FakeResearcher::failing();

        let result = resolve_company_info(&store, &research, None, "Acme", false).await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert!(store.find("Acme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logo_failure_does_not_fail_request() {
        let store = MemoryCompanyStore::default();
        let research = FakeResearcher::new().with_basic_info(ACME_BASIC);
        let logos = FakeLogoProvider::failing();

        let response = resolve_company_info(&store, &research, Some(&logos), "Acme", false)
            .await
            .unwrap();

        assert_eq!(response.logo_url, "");
        assert_eq!(logos.requested_domains(), vec!["www.acme.com".to_string()]);
    }

    #[tokio::test]
    async fn test_logo_lookup_uses_constructed_domain() {
        let store = MemoryCompanyStore::default();
        let research = FakeResearcher::new().with_basic_info("No website listed.");
        let logos = FakeLogoProvider::empty();

        let response = resolve_company_info(&store, &research, Some(&logos), "Road Runner", false)
            .await
            .unwrap();

        assert_eq!(response.website, "");
        assert_eq!(response.logo_url, "");
        assert_eq!(logos.requested_domains(), vec!["roadrunner.com".to_string()]);
    }
}
