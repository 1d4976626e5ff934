//! Client code for newsdesk.
//!
//! This crate provides the news providers, the aggregation and fallback
//! logic, page scraping, the summarizer client and the pipeline that ties
//! them together for the HTTP front-end.

pub mod aggregate;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod provider;
pub mod scrape;
pub mod summarize;

pub use aggregate::{Aggregator, merge_unique};
pub use fetch::{FetchClient, FetchConfig, FetchError, FetchResponse};
pub use pipeline::{Pipeline, PipelineSettings};
pub use provider::{
    Discovery, GdeltConfig, GdeltProvider, GoogleNewsConfig, GoogleNewsProvider, NewsProvider, ProviderError,
};
pub use scrape::{HtmlScraper, PageText, Scraper, fetch_all};
pub use summarize::{OpenAiConfig, OpenAiSummarizer, SummarizeError, Summarizer};
