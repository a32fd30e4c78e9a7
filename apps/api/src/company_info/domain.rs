//! Website domain extraction from free-form research text.
//!
//! The basic-info answer usually carries a "Website: ..." line; the domain found
//! there keys the logo lookup.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use tracing::debug;

/// Tried in order; the first capture wins. Labelled URLs beat bare ones, and
/// schemed URLs beat `www.` tokens.
static WEBSITE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)website\s*[:\-]?\s*(https?://\S+)",
        r"(?i)web\s*[:\-]?\s*(https?://\S+)",
        r"(?i)url\s*[:\-]?\s*(https?://\S+)",
        r"(?i)website\s*[:\-]?\s*(www\.\S+)",
        r"(?i)web\s*[:\-]?\s*(www\.\S+)",
        r"(?i)url\s*[:\-]?\s*(www\.\S+)",
        r"(?i)(https?://\S+)",
        r"(?i)(www\.\S+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid regex pattern"))
    .collect()
});

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\((.*?)\)").expect("Invalid regex pattern"));
static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.,;!?)*"'>]+$"#).expect("Invalid regex pattern"));
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("Invalid regex pattern"));
static LEADING_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\s:.]+").expect("Invalid regex pattern"));

const MIN_HOST_LEN: usize = 3;
const MAX_HOST_LEN: usize = 50;

/// Finds the company website in `text` and returns its host name.
///
/// Returns `None` when no URL-looking token exists or the host fails the sanity
/// checks (must contain a dot, 4-49 chars, no whitespace).
pub fn extract_valid_domain(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let preview: String = text.chars().take(200).collect();
    debug!("Extracting domain from text: {preview}...");

    let Some(raw) = find_website(text) else {
        debug!("No URL found in text");
        return None;
    };
    debug!("Found URL: {raw}");

    let cleaned = clean_url(raw);
    debug!("Cleaned URL: {cleaned}");

    let candidate = if cleaned.contains("://") {
        cleaned
    } else {
        format!("https://{cleaned}")
    };

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(e) => {
            debug!("Invalid URL format: {candidate} - {e}");
            return None;
        }
    };

    let host = url.host_str()?;
    if is_plausible_host(host) {
        debug!("Valid domain found: {host}");
        Some(host.to_string())
    } else {
        debug!("Rejected hostname: {host}");
        None
    }
}

/// Guesses `<name>.com` from the company name, keeping only ASCII letters and digits.
pub fn construct_domain_from_company(company: &str) -> Option<String> {
    let clean: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if clean.len() < 2 {
        return None;
    }

    let domain = format!("{clean}.com");
    debug!("Constructed domain from company name: {domain}");
    Some(domain)
}

fn find_website(text: &str) -> Option<&str> {
    WEBSITE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    })
}

fn clean_url(raw: &str) -> String {
    let mut url = raw.to_string();

    if let Some(target) = MARKDOWN_LINK
        .captures(&url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
    {
        url = target;
    }

    url = TRAILING_PUNCTUATION.replace(&url, "").into_owned();
    url = BRACKETED.replace_all(&url, "").into_owned();
    url = LEADING_NOISE.replace(&url, "").into_owned();
    url.trim().to_string()
}

fn is_plausible_host(host: &str) -> bool {
    host.contains('.')
        && host.len() > MIN_HOST_LEN
        && host.len() < MAX_HOST_LEN
        && !host.chars().any(char::is_whitespace)
}
