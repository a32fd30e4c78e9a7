pub mod extract;
pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::company_info::handlers as company_info;
use crate::evaluation::handlers as evaluation;
use crate::research::handlers as research;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api", get(health::welcome_handler))
        // Single-prompt research
        .route(
            "/api/ai-company-sources",
            post(research::handle_company_sources),
        )
        .route("/api/ai-company-info", post(research::handle_company_info))
        .route(
            "/api/ai-company-summary",
            post(research::handle_company_summary),
        )
        // Cached company profiles
        .route(
            "/api/company-ai-info",
            get(company_info::handle_list_companies).post(company_info::handle_company_ai_info),
        )
        .route(
            "/api/company-ai-info/:company/tags",
            put(company_info::handle_update_tags),
        )
        // Resume evaluations
        .route("/api/ai-resume-evaluate", post(evaluation::handle_evaluate))
        .route(
            "/api/ai-resume-evaluate/refresh",
            post(evaluation::handle_evaluate_refresh),
        )
        .route(
            "/api/resume-evaluations",
            get(evaluation::handle_list_evaluations),
        )
        // One segment: a company name for GET, an evaluation id for DELETE.
        .route(
            "/api/resume-evaluations/:key",
            get(evaluation::handle_company_evaluations).delete(evaluation::handle_delete_evaluation),
        )
        .with_state(state)
}
