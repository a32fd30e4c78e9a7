// Company research cache: domain extraction, enrichment flow, persistence, routes.
// All AI calls go through research::ResearchAgent; all logo calls through logo::LogoProvider.

pub mod domain;
pub mod handlers;
pub mod service;
pub mod store;
