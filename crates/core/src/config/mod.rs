//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (NEWSDESK_*, plus the conventional OPENAI_API_KEY)
//! 2. TOML config file (if NEWSDESK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (NEWSDESK_*)
/// 2. OPENAI_API_KEY (summarizer key only)
/// 3. TOML config file (if NEWSDESK_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP front-end listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// User-Agent string for every outbound request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of articles gathered per query.
    #[serde(default = "default_article_count")]
    pub article_count: usize,

    /// Maximum characters of scraped text kept per article.
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,

    /// Maximum scrapes in flight at once.
    #[serde(default = "default_scrape_concurrency")]
    pub scrape_concurrency: usize,

    /// Lifetime of a cached answer in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Timeout for the feed provider request in milliseconds.
    #[serde(default = "default_feed_timeout_ms")]
    pub feed_timeout_ms: u64,

    /// Timeout for the search provider request in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,

    /// Timeout for a single page scrape in milliseconds.
    #[serde(default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,

    /// Feed interface language, e.g. `en-IN`.
    #[serde(default = "default_feed_lang")]
    pub feed_lang: String,

    /// Feed edition region, e.g. `IN`.
    #[serde(default = "default_feed_region")]
    pub feed_region: String,

    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,

    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Summarizer API key.
    ///
    /// Set via NEWSDESK_OPENAI_API_KEY or OPENAI_API_KEY.
    /// Required only when a query reaches the summarizer.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Timeout for the summarizer call in milliseconds.
    #[serde(default = "default_summarizer_timeout_ms")]
    pub summarizer_timeout_ms: u64,

    /// Browser origins allowed by the CORS policy.
    ///
    /// Set via NEWSDESK_ALLOWED_ORIGINS (TOML array or `[a, b]` list).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; NewsResearchBot/0.4)".into()
}

fn default_article_count() -> usize {
    4
}

fn default_max_snippet_chars() -> usize {
    800
}

fn default_scrape_concurrency() -> usize {
    6
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_feed_timeout_ms() -> u64 {
    5_000
}

fn default_search_timeout_ms() -> u64 {
    6_000
}

fn default_scrape_timeout_ms() -> u64 {
    6_000
}

fn default_feed_lang() -> String {
    "en-IN".into()
}

fn default_feed_region() -> String {
    "IN".into()
}

fn default_feed_base_url() -> String {
    "https://news.google.com".into()
}

fn default_search_base_url() -> String {
    "https://api.gdeltproject.org".into()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".into()
}

fn default_summarizer_timeout_ms() -> u64 {
    60_000
}

fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:3002",
        "http://127.0.0.1:3002",
        "http://localhost:3003",
        "http://127.0.0.1:3003",
        "https://santosh559.github.io",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            user_agent: default_user_agent(),
            article_count: default_article_count(),
            max_snippet_chars: default_max_snippet_chars(),
            scrape_concurrency: default_scrape_concurrency(),
            cache_ttl_secs: default_cache_ttl_secs(),
            feed_timeout_ms: default_feed_timeout_ms(),
            search_timeout_ms: default_search_timeout_ms(),
            scrape_timeout_ms: default_scrape_timeout_ms(),
            feed_lang: default_feed_lang(),
            feed_region: default_feed_region(),
            feed_base_url: default_feed_base_url(),
            search_base_url: default_search_base_url(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            summarizer_timeout_ms: default_summarizer_timeout_ms(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed_timeout_ms)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_millis(self.scrape_timeout_ms)
    }

    pub fn summarizer_timeout(&self) -> Duration {
        Duration::from_millis(self.summarizer_timeout_ms)
    }

    /// Build the layered figment without extracting it.
    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("NEWSDESK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(Env::raw().only(&["OPENAI_API_KEY"]))
            .merge(
                Env::prefixed("NEWSDESK_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the summarizer key is available (deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is unset or blank.
    pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "openai_api_key".into(),
                hint: "Set OPENAI_API_KEY or NEWSDESK_OPENAI_API_KEY environment variable".into(),
            })
    }
}
