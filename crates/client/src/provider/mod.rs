//! News-discovery providers.
//!
//! Each provider issues a single bounded-timeout request and normalizes the
//! provider-specific payload into [`Article`]s.
//!
//! ### Contract
//!
//! - [`NewsProvider::search`] reports every failure as a [`ProviderError`].
//! - [`NewsProvider::discover`] is what callers use: it never fails. Transport,
//!   status, timeout and parse errors all degrade to [`Discovery::Unavailable`],
//!   and the reason is logged.
//!
//! ### Providers
//!
//! | Provider | Module | Payload |
//! |----------|--------|---------|
//! | Google News search feed | [`google_news`] | RSS 2.0 |
//! | GDELT DOC 2.0 API | [`gdelt`] | JSON |

pub mod error;
pub mod gdelt;
pub mod google_news;

pub use error::ProviderError;
pub use gdelt::{GdeltConfig, GdeltProvider};
pub use google_news::{GoogleNewsConfig, GoogleNewsProvider};

use async_trait::async_trait;
use newsdesk_core::Article;

/// Outcome of asking one provider for articles.
#[derive(Debug, Clone)]
pub enum Discovery {
    /// At least one article was found.
    Found(Vec<Article>),
    /// The provider answered but had nothing for the query.
    NoResults,
    /// The provider could not be used for this request.
    Unavailable(ProviderError),
}

impl Discovery {
    fn from_result(result: Result<Vec<Article>, ProviderError>) -> Self {
        match result {
            Ok(articles) if articles.is_empty() => Discovery::NoResults,
            Ok(articles) => Discovery::Found(articles),
            Err(e) => Discovery::Unavailable(e),
        }
    }

    /// Number of articles found (0 for both empty outcomes).
    pub fn len(&self) -> usize {
        match self {
            Discovery::Found(articles) => articles.len(),
            Discovery::NoResults | Discovery::Unavailable(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_articles(self) -> Vec<Article> {
        match self {
            Discovery::Found(articles) => articles,
            Discovery::NoResults | Discovery::Unavailable(_) => Vec::new(),
        }
    }
}

/// A news-discovery service.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Ask the provider for up to `count` articles matching `query`.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<Article>, ProviderError>;

    /// Like [`search`](Self::search) but never fails.
    async fn discover(&self, query: &str, count: usize) -> Discovery {
        let discovery = Discovery::from_result(self.search(query, count).await);

        match &discovery {
            Discovery::Found(articles) => {
                tracing::debug!(provider = self.name(), count = articles.len(), "provider returned articles")
            }
            Discovery::NoResults => tracing::debug!(provider = self.name(), "provider returned no articles"),
            Discovery::Unavailable(e) => tracing::warn!(provider = self.name(), error = %e, "provider unavailable"),
        }

        discovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Vec<Article>, ProviderError>);

    #[async_trait]
    impl NewsProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str, _count: usize) -> Result<Vec<Article>, ProviderError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_discover_found() {
        let provider = Fixed(Ok(vec![Article::new("t", "https://a.example/1", "A")]));
        let discovery = provider.discover("q", 4).await;

        assert!(matches!(discovery, Discovery::Found(_)));
        assert_eq!(discovery.len(), 1);
        assert_eq!(discovery.into_articles()[0].url, "https://a.example/1");
    }

    #[tokio::test]
    async fn test_discover_no_results() {
        let discovery = Fixed(Ok(vec![])).discover("q", 4).await;
        assert!(matches!(discovery, Discovery::NoResults));
        assert!(discovery.is_empty());
    }

    #[tokio::test]
    async fn test_discover_absorbs_errors() {
        let discovery = Fixed(Err(ProviderError::Timeout)).discover("q", 4).await;
        assert!(matches!(discovery, Discovery::Unavailable(ProviderError::Timeout)));
        assert!(discovery.into_articles().is_empty());
    }
}
