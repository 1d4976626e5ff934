//! Article page scraping.
//!
//! A scrape is best effort: the page is fetched once with a bounded timeout,
//! its paragraph text is extracted and cut to a fixed number of characters.
//! Any failure (invalid URL, network, timeout, non-success status, oversized
//! body) yields [`PageText::Unavailable`], never an error.

pub mod parallel;

pub use parallel::{DEFAULT_CONCURRENCY, fetch_all};

use async_trait::async_trait;
use newsdesk_core::AppConfig;

use crate::extract::{paragraph_text, truncate_chars};
use crate::fetch::{FetchClient, FetchConfig, FetchError};

/// Default cap on scraped characters per page.
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Outcome of scraping one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// The page was fetched; the text may still be empty if it had no paragraphs.
    Extracted(String),
    /// The page could not be fetched.
    Unavailable,
}

impl PageText {
    /// Text for the evidence bundle; empty when unavailable.
    pub fn into_text(self) -> String {
        match self {
            PageText::Extracted(text) => text,
            PageText::Unavailable => String::new(),
        }
    }
}

/// Turns an article URL into a bounded text snippet.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> PageText;
}

/// Scraper that fetches HTML and keeps paragraph text.
#[derive(Debug, Clone)]
pub struct HtmlScraper {
    fetch: FetchClient,
    max_chars: usize,
}

impl HtmlScraper {
    pub fn new(fetch: FetchClient, max_chars: usize) -> Self {
        Self { fetch, max_chars }
    }

    /// Build a scraper with the configured user agent, timeout and snippet length.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let fetch = FetchClient::new(FetchConfig {
            user_agent: config.user_agent.clone(),
            timeout: config.scrape_timeout(),
            ..Default::default()
        })?;

        Ok(Self::new(fetch, config.max_snippet_chars))
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Fetch and extract, reporting failures.
    pub async fn try_scrape(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch.fetch(url).await?;
        let text = paragraph_text(&response.text());

        Ok(truncate_chars(&text, self.max_chars).to_string())
    }
}

#[async_trait]
impl Scraper for HtmlScraper {
    async fn scrape(&self, url: &str) -> PageText {
        match self.try_scrape(url).await {
            Ok(text) => {
                tracing::debug!(%url, chars = text.chars().count(), "scraped page");
                PageText::Extracted(text)
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "scrape failed");
                PageText::Unavailable
            }
        }
    }
}
