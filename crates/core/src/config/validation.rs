//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `article_count` is outside 1..=20
    /// - `max_snippet_chars` or `cache_ttl_secs` is 0
    /// - `scrape_concurrency` is 0 or exceeds 32
    /// - any timeout is less than 100ms or exceeds 5 minutes
    /// - `user_agent`, `feed_lang` or `feed_region` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=20).contains(&self.article_count) {
            return Err(invalid("article_count", "must be between 1 and 20"));
        }

        if self.max_snippet_chars == 0 {
            return Err(invalid("max_snippet_chars", "must be greater than 0"));
        }

        if self.scrape_concurrency == 0 {
            return Err(invalid("scrape_concurrency", "must be at least 1"));
        }
        if self.scrape_concurrency > 32 {
            return Err(invalid("scrape_concurrency", "must not exceed 32"));
        }

        if self.cache_ttl_secs == 0 {
            return Err(invalid("cache_ttl_secs", "must be greater than 0"));
        }

        for (field, value) in [
            ("feed_timeout_ms", self.feed_timeout_ms),
            ("search_timeout_ms", self.search_timeout_ms),
            ("scrape_timeout_ms", self.scrape_timeout_ms),
            ("summarizer_timeout_ms", self.summarizer_timeout_ms),
        ] {
            if value < MIN_TIMEOUT_MS {
                return Err(invalid(field, "must be at least 100ms"));
            }
            if value > MAX_TIMEOUT_MS {
                return Err(invalid(field, "must not exceed 5 minutes (300000ms)"));
            }
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.feed_lang.is_empty() || self.feed_lang.starts_with('-') {
            return Err(invalid("feed_lang", "must be a language tag such as en-IN"));
        }

        if self.feed_region.is_empty() {
            return Err(invalid("feed_region", "must not be empty"));
        }

        if self.allowed_origins.is_empty() {
            tracing::warn!("allowed_origins is empty; CORS falls back to a permissive policy without credentials");
        }

        Ok(())
    }
}
