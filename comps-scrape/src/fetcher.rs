//! Site text fetching and extraction

use std::future::Future;
use std::time::Duration;

use comps_core::CompsError;
use reqwest::{Client, StatusCode};
use scraper::Html;
use tracing::debug;

/// Timeout for the direct fetch of `https://{domain}`
const DIRECT_TIMEOUT: Duration = Duration::from_secs(4);

/// Timeout for the web-archive fallback fetch
const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Client for fetching company website text
#[derive(Debug, Clone)]
pub struct SiteTextFetcher {
    client: Client,
}

impl SiteTextFetcher {
    /// Create a new site text fetcher
    pub fn new() -> Result<Self, CompsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CompsError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Best-effort visible text for a domain
    ///
    /// Tries `https://{domain}` first, then the web.archive.org mirror.
    /// Any failure (transport error, non-200 status, timeout) moves on to
    /// the next attempt; when all attempts fail the result is the empty
    /// string and the caller proceeds without site text.
    pub async fn fetch_site_text(&self, domain: &str) -> String {
        let domain = domain.trim();
        if domain.is_empty() {
            return String::new();
        }

        let client = self.client.clone();
        let html = first_success(fetch_attempts(domain), move |url, timeout| {
            let client = client.clone();
            async move { fetch_page(&client, &url, timeout).await }
        })
        .await;

        match html {
            Some(html) => extract_visible_text(&html),
            None => {
                debug!("No fetch attempt succeeded for {}", domain);
                String::new()
            }
        }
    }
}

/// The ordered fetch attempts for a domain: direct page, then archive mirror
fn fetch_attempts(domain: &str) -> Vec<(String, Duration)> {
    vec![
        (format!("https://{}", domain), DIRECT_TIMEOUT),
        (
            format!("http://web.archive.org/web/{}", domain),
            ARCHIVE_TIMEOUT,
        ),
    ]
}

/// Run fetch attempts in order; the first one that yields a body wins
async fn first_success<F, Fut>(attempts: Vec<(String, Duration)>, mut fetch: F) -> Option<String>
where
    F: FnMut(String, Duration) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    for (url, timeout) in attempts {
        if let Some(body) = fetch(url, timeout).await {
            return Some(body);
        }
    }
    None
}

/// Fetch one URL, returning its body only on HTTP 200
async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Option<String> {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("Fetch failed for {}: {}", url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        debug!("Fetch of {} returned status {}", url, response.status());
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            debug!("Failed to read body of {}: {}", url, e);
            None
        }
    }
}

/// Extract the visible text of an HTML document
///
/// Text nodes are joined with single spaces and all whitespace runs are
/// collapsed. Script, style, and noscript content is skipped.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut words: Vec<&str> = Vec::new();
    for node in document.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        if let Some(parent) = node.parent() {
            if let Some(element) = parent.value().as_element() {
                if matches!(element.name(), "script" | "style" | "noscript") {
                    continue;
                }
            }
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}
