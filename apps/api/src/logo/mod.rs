//! Company logo lookup via Brandfetch.
//!
//! `AppState` carries an `Option<Arc<dyn LogoProvider>>`; `None` when no
//! Brandfetch key is configured, in which case logos are never fetched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod throttle;

use throttle::CallGate;

const BRANDFETCH_API_URL: &str = "https://api.brandfetch.io/v2/brands";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {reason}")]
    Api { status: u16, reason: String },
}

#[async_trait]
pub trait LogoProvider: Send + Sync {
    /// URL of the brand's primary logo, or `None` when the brand has none.
    async fn fetch_logo(&self, domain: &str) -> Result<Option<String>, LogoError>;
}

#[derive(Debug, Deserialize)]
struct BrandResponse {
    #[serde(default)]
    logos: Vec<BrandLogo>,
}

#[derive(Debug, Deserialize)]
struct BrandLogo {
    #[serde(default)]
    formats: Vec<LogoFormat>,
}

#[derive(Debug, Deserialize)]
struct LogoFormat {
    src: String,
}

impl BrandResponse {
    fn primary_logo(self) -> Option<String> {
        self.logos
            .into_iter()
            .next()
            .and_then(|logo| logo.formats.into_iter().next())
            .map(|format| format.src)
    }
}

pub struct BrandfetchClient {
    client: Client,
    api_key: String,
    gate: Arc<dyn CallGate>,
}

impl BrandfetchClient {
    pub fn new(api_key: String, gate: Arc<dyn CallGate>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            gate,
        }
    }
}

#[async_trait]
impl LogoProvider for BrandfetchClient {
    async fn fetch_logo(&self, domain: &str) -> Result<Option<String>, LogoError> {
        if let Err(e) = self.gate.acquire().await {
            warn!("Logo call gate unavailable, calling ungated: {e:#}");
        }

        info!("Fetching logo for domain: {domain}");

        let response = self
            .client
            .get(format!("{BRANDFETCH_API_URL}/{domain}"))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .send()
            .await?;

        match brand_outcome(response.status())? {
            BrandLookup::Unknown => Ok(None),
            BrandLookup::Found => {
                let brand: BrandResponse = response.json().await?;
                Ok(brand.primary_logo())
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum BrandLookup {
    Found,
    Unknown,
}

/// 404 means Brandfetch has no brand for the domain. Any other non-success
/// status is an error.
fn brand_outcome(status: StatusCode) -> Result<BrandLookup, LogoError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(BrandLookup::Unknown);
    }
    if !status.is_success() {
        return Err(LogoError::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }
    Ok(BrandLookup::Found)
}
