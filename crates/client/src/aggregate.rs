//! Multi-provider aggregation with fallback and deduplication.
//!
//! The primary provider is always asked first. The secondary provider is only
//! asked when the primary comes back with fewer than `count` articles, whether
//! because it had fewer results or because it was unavailable. Secondary
//! articles are appended after the primary ones, skipping any URL already
//! seen, and the merged list is cut to `count`.

use std::collections::HashSet;
use std::sync::Arc;

use newsdesk_core::{Article, Error};

use crate::provider::NewsProvider;

/// Drives the providers in priority order.
#[derive(Clone)]
pub struct Aggregator {
    primary: Arc<dyn NewsProvider>,
    secondary: Arc<dyn NewsProvider>,
}

impl Aggregator {
    pub fn new(primary: Arc<dyn NewsProvider>, secondary: Arc<dyn NewsProvider>) -> Self {
        Self { primary, secondary }
    }

    /// Gather up to `count` URL-unique articles for `query`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoArticlesFound` when both providers come back empty.
    pub async fn aggregate(&self, query: &str, count: usize) -> Result<Vec<Article>, Error> {
        let primary = self.primary.discover(query, count).await.into_articles();

        let merged = if primary.len() < count {
            tracing::info!(
                primary = self.primary.name(),
                secondary = self.secondary.name(),
                found = primary.len(),
                wanted = count,
                "primary provider under-delivered, falling back"
            );
            let secondary = self.secondary.discover(query, count).await.into_articles();
            merge_unique(primary, secondary, count)
        } else {
            merge_unique(primary, Vec::new(), count)
        };

        if merged.is_empty() {
            return Err(Error::NoArticlesFound(query.to_string()));
        }

        tracing::debug!(count = merged.len(), "aggregated articles");
        Ok(merged)
    }
}

/// Merge two provider results, first-seen URL wins, primary first, cut to `count`.
pub fn merge_unique(primary: Vec<Article>, secondary: Vec<Article>, count: usize) -> Vec<Article> {
    let mut seen = HashSet::new();

    primary
        .into_iter()
        .chain(secondary)
        .filter(|article| seen.insert(article.url.clone()))
        .take(count)
        .collect()
}
