// src/page/http.rs
// =============================================================================
// This module downloads Wikipedia pages.
//
// Key functionality:
// - One shared reqwest client per run (connection pooling)
// - Fixed User-Agent so Wikipedia can identify the tool
// - Fixed timeout per request (60 seconds unless configured)
// - Distinct errors for timeouts, connection failures and bad status codes
// - Optional origin override, so a local mirror can serve the pages while the
//   search keeps working with canonical wikipedia.org URLs
//
// WikiClient implements LinkSource: fetch the page, then hand the HTML to
// page::html to pull out the article links.
// =============================================================================

use super::html::extract_content_links;
use super::url::CanonicalUrl;
use super::LinkSource;
use crate::error::FetchError;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = "wikipath-finder";

/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for the page fetcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for one whole request, body included.
    pub timeout: Duration,
    /// When set, requests go to this origin instead of https://wikipedia.org.
    pub origin: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            origin: None,
        }
    }
}

/// HTTP client that turns a canonical URL into the raw links of its article body.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    origin: Option<Url>,
}

impl WikiClient {
    // Creates the client
    //
    // Building a reqwest client only fails when the TLS backend cannot be
    // initialised, so callers just report the error.
    pub fn new(config: ClientConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()?;

        Ok(Self {
            client,
            origin: config.origin,
        })
    }

    // The URL actually requested for a canonical page
    //
    // Without an origin override this is the canonical URL itself.
    pub fn request_url(&self, url: &CanonicalUrl) -> String {
        match &self.origin {
            Some(origin) => format!("{}{}", origin.as_str().trim_end_matches('/'), url.path()),
            None => url.to_string(),
        }
    }

    // Fetches a page and returns its HTML
    //
    // Any non-2xx answer is an error: Wikipedia serves articles with 200 and
    // redirects are already followed by the client.
    pub async fn fetch_page(&self, url: &CanonicalUrl) -> Result<String, FetchError> {
        let target = self.request_url(url);
        debug!("GET {}", target);

        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|e| categorize_error(&target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: target,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| categorize_error(&target, e))
    }
}

impl LinkSource for WikiClient {
    fn links<'a>(&'a self, url: &'a CanonicalUrl) -> BoxFuture<'a, Result<Vec<String>, FetchError>> {
        async move {
            let html = self.fetch_page(url).await?;
            Ok(extract_content_links(&html))
        }
        .boxed()
    }
}

// Categorizes reqwest errors
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Anything else (broken body, too many redirects, ...)
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url, source: error }
    } else {
        FetchError::Transport { url, source: error }
    }
}
