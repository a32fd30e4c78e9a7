use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::{CompanyAiInfoRow, CompanyInfoUpdate, CompanyListingRow};

/// Persistence for cached company research. Carried in `AppState` as
/// `Arc<dyn CompanyInfoStore>`.
#[async_trait]
pub trait CompanyInfoStore: Send + Sync {
    async fn find(&self, company: &str) -> Result<Option<CompanyAiInfoRow>, sqlx::Error>;

    /// Inserts or overwrites the research fields and bumps `updated_at`.
    /// Tags are never touched; the logo is only replaced when the update carries one.
    async fn upsert(&self, update: CompanyInfoUpdate) -> Result<CompanyAiInfoRow, sqlx::Error>;

    /// Returns `None` when the company has no cached record.
    async fn update_tags(
        &self,
        company: &str,
        tags: &[String],
    ) -> Result<Option<CompanyAiInfoRow>, sqlx::Error>;

    async fn list(&self) -> Result<Vec<CompanyListingRow>, sqlx::Error>;
}

pub struct PgCompanyInfoStore {
    pool: PgPool,
}

impl PgCompanyInfoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyInfoStore for PgCompanyInfoStore {
    async fn find(&self, company: &str) -> Result<Option<CompanyAiInfoRow>, sqlx::Error> {
        sqlx::query_as::<_, CompanyAiInfoRow>("SELECT * FROM company_ai_info WHERE company = $1")
            .bind(company)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert(&self, update: CompanyInfoUpdate) -> Result<CompanyAiInfoRow, sqlx::Error> {
        sqlx::query_as::<_, CompanyAiInfoRow>(
            r#"
            INSERT INTO company_ai_info
                (id, company, basic_info, tech_jobs, summary, logo_url, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (company) DO UPDATE SET
                basic_info = EXCLUDED.basic_info,
                tech_jobs  = EXCLUDED.tech_jobs,
                summary    = EXCLUDED.summary,
                logo_url   = COALESCE(EXCLUDED.logo_url, company_ai_info.logo_url),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&update.company)
        .bind(&update.basic_info)
        .bind(&update.tech_jobs)
        .bind(&update.summary)
        .bind(&update.logo_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_tags(
        &self,
        company: &str,
        tags: &[String],
    ) -> Result<Option<CompanyAiInfoRow>, sqlx::Error> {
        sqlx::query_as::<_, CompanyAiInfoRow>(
            "UPDATE company_ai_info SET tags = $2 WHERE company = $1 RETURNING *",
        )
        .bind(company)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list(&self) -> Result<Vec<CompanyListingRow>, sqlx::Error> {
        sqlx::query_as::<_, CompanyListingRow>(
            "SELECT company, tags, logo_url, summary FROM company_ai_info ORDER BY company",
        )
        .fetch_all(&self.pool)
        .await
    }
}
