//! End-to-end chat pipeline: aggregate, scrape, summarize, cache.
//!
//! A query is answered by:
//!
//! 1. Rejecting a blank query.
//! 2. Refusing to run without a configured summarizer.
//! 3. Returning a fresh cached answer for the exact same query, if any.
//! 4. Aggregating articles from the providers (fails with `NoArticlesFound`).
//! 5. Scraping every article URL with bounded concurrency.
//! 6. Summarizing the evidence bundle and caching the answer.

use std::sync::Arc;

use newsdesk_core::{AppConfig, ChatAnswer, Error, EvidenceDoc, ResultCache};

use crate::aggregate::Aggregator;
use crate::scrape::{Scraper, fetch_all};
use crate::summarize::{Summarizer, openai::MISSING_KEY};

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Articles gathered per query.
    pub article_count: usize,
    /// Maximum scrapes in flight.
    pub scrape_concurrency: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { article_count: 4, scrape_concurrency: crate::scrape::DEFAULT_CONCURRENCY }
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self { article_count: config.article_count, scrape_concurrency: config.scrape_concurrency }
    }
}

/// Shared request-path state. Cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    aggregator: Aggregator,
    scraper: Arc<dyn Scraper>,
    summarizer: Option<Arc<dyn Summarizer>>,
    cache: Arc<ResultCache<ChatAnswer>>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        aggregator: Aggregator, scraper: Arc<dyn Scraper>, summarizer: Option<Arc<dyn Summarizer>>,
        cache: Arc<ResultCache<ChatAnswer>>, settings: PipelineSettings,
    ) -> Self {
        Self { aggregator, scraper, summarizer, cache, settings }
    }

    pub fn cache(&self) -> &Arc<ResultCache<ChatAnswer>> {
        &self.cache
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Aggregate articles and scrape them into evidence documents in article order.
    pub async fn gather_evidence(&self, query: &str) -> Result<Vec<EvidenceDoc>, Error> {
        let articles = self.aggregator.aggregate(query, self.settings.article_count).await?;
        let urls: Vec<String> = articles.iter().map(|a| a.url.clone()).collect();

        let mut texts = fetch_all(self.scraper.clone(), &urls, self.settings.scrape_concurrency).await;
        let scraped = texts.values().filter(|text| !text.is_empty()).count();
        tracing::info!(articles = articles.len(), scraped, "gathered evidence");

        Ok(articles
            .iter()
            .map(|article| EvidenceDoc::from_article(article, texts.remove(&article.url).unwrap_or_default()))
            .collect())
    }

    /// Answer a news question.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank query
    /// - `MissingCredentials` when no summarizer is configured
    /// - `NoArticlesFound` when neither provider has anything
    /// - `SummarizerFailed` when the summarizer call fails
    pub async fn answer(&self, query: &str) -> Result<ChatAnswer, Error> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query must not be empty".to_string()));
        }

        let Some(summarizer) = self.summarizer.as_ref() else {
            return Err(Error::MissingCredentials(MISSING_KEY.to_string()));
        };

        if let Some(answer) = self.cache.get(query).await {
            tracing::debug!(query, "cache hit");
            return Ok(answer);
        }

        let docs = self.gather_evidence(query).await?;

        let answer = summarizer.summarize(&docs).await.map_err(|e| {
            tracing::error!(model = summarizer.model_name(), error = %e, "summarizer failed");
            Error::SummarizerFailed(e.to_string())
        })?;

        self.cache.set(query, answer.clone()).await;
        Ok(answer)
    }
}
