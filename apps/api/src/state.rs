use std::sync::Arc;

use crate::company_info::store::CompanyInfoStore;
use crate::evaluation::store::EvaluationStore;
use crate::logo::LogoProvider;
use crate::research::ResearchAgent;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyInfoStore>,
    pub evaluations: Arc<dyn EvaluationStore>,
    /// Pluggable research backend. Default: PerplexityResearcher.
    pub research: Arc<dyn ResearchAgent>,
    /// `None` when BRANDFETCH_API_KEY is unset; logos are then never fetched.
    pub logos: Option<Arc<dyn LogoProvider>>,
}
