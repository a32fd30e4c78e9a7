use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::evaluation::{NewResumeEvaluation, ResumeEvaluationRow};

/// Persistence for cached resume evaluations. Listings are newest first.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    async fn find(
        &self,
        company: &str,
        resume_hash: &str,
    ) -> Result<Option<ResumeEvaluationRow>, sqlx::Error>;

    async fn insert(
        &self,
        evaluation: NewResumeEvaluation,
    ) -> Result<ResumeEvaluationRow, sqlx::Error>;

    /// Removes every evaluation for the pair. Returns how many were removed.
    async fn delete_matching(&self, company: &str, resume_hash: &str) -> Result<u64, sqlx::Error>;

    async fn list_all(&self) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error>;

    async fn list_for_company(
        &self,
        company: &str,
    ) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error>;

    /// Returns `false` when no evaluation had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;
}

pub struct PgEvaluationStore {
    pool: PgPool,
}

impl PgEvaluationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationStore for PgEvaluationStore {
    async fn find(
        &self,
        company: &str,
        resume_hash: &str,
    ) -> Result<Option<ResumeEvaluationRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeEvaluationRow>(
            "SELECT * FROM resume_evaluations WHERE company = $1 AND resume_hash = $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(company)
        .bind(resume_hash)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert(
        &self,
        evaluation: NewResumeEvaluation,
    ) -> Result<ResumeEvaluationRow, sqlx::Error> {
        sqlx::query_as::<_, ResumeEvaluationRow>(
            r#"
            INSERT INTO resume_evaluations
                (id, company, resume, resume_hash, qualifications, rating, advice)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&evaluation.company)
        .bind(&evaluation.resume)
        .bind(&evaluation.resume_hash)
        .bind(&evaluation.qualifications)
        .bind(&evaluation.rating)
        .bind(&evaluation.advice)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_matching(&self, company: &str, resume_hash: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM resume_evaluations WHERE company = $1 AND resume_hash = $2")
                .bind(company)
                .bind(resume_hash)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeEvaluationRow>(
            "SELECT * FROM resume_evaluations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn list_for_company(
        &self,
        company: &str,
    ) -> Result<Vec<ResumeEvaluationRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeEvaluationRow>(
            "SELECT * FROM resume_evaluations WHERE company = $1 ORDER BY created_at DESC",
        )
        .bind(company)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resume_evaluations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
