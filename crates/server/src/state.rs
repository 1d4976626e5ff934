//! Process-wide state shared by every request.

use std::sync::Arc;

use newsdesk_client::{
    Aggregator, FetchError, GdeltConfig, GdeltProvider, GoogleNewsConfig, GoogleNewsProvider, HtmlScraper,
    OpenAiSummarizer, Pipeline, PipelineSettings, ProviderError, Summarizer,
};
use newsdesk_core::{AppConfig, ChatAnswer, Error, ResultCache};

/// Failures while wiring up the pipeline at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build provider client: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to build scraper: {0}")]
    Scraper(#[from] FetchError),

    #[error("failed to build summarizer: {0}")]
    Summarizer(Error),
}

/// Handle to the pipeline and its cache.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Build providers, scraper, summarizer and cache from configuration.
    ///
    /// A missing summarizer key is not fatal: the server starts and every chat
    /// request answers with a credentials error until the key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let primary = GoogleNewsProvider::new(GoogleNewsConfig::from(config))?;
        let secondary = GdeltProvider::new(GdeltConfig::from(config))?;
        let scraper = HtmlScraper::from_config(config)?;

        let summarizer: Option<Arc<dyn Summarizer>> = match OpenAiSummarizer::from_config(config) {
            Ok(summarizer) => {
                tracing::info!(model = summarizer.model_name(), "summarizer configured");
                Some(Arc::new(summarizer))
            }
            Err(Error::MissingCredentials(reason)) => {
                tracing::warn!(%reason, "summarizer not configured, chat requests will fail");
                None
            }
            Err(e) => return Err(StartupError::Summarizer(e)),
        };

        let pipeline = Pipeline::new(
            Aggregator::new(Arc::new(primary), Arc::new(secondary)),
            Arc::new(scraper),
            summarizer,
            Arc::new(ResultCache::<ChatAnswer>::new(config.cache_ttl())),
            PipelineSettings::from(config),
        );

        Ok(Self::new(pipeline))
    }
}
