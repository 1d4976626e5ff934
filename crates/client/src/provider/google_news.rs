//! Google News search feed provider.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://news.google.com/rss/search`
//! - **Parameters**: `q` (escaped query), `hl` (language), `gl` (region),
//!   `ceid` (`<region>:<language prefix>`).
//! - **Authentication**: none.
//! - **Normalization**: each RSS `<item>` becomes an [`Article`]; the outlet
//!   name comes from the item's `<source>` element and falls back to
//!   [`DEFAULT_SOURCE`].

use std::time::Duration;

use async_trait::async_trait;
use newsdesk_core::{AppConfig, Article};
use url::Url;

use super::{NewsProvider, ProviderError};

/// Default base URL for the Google News feed.
const DEFAULT_BASE_URL: &str = "https://news.google.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source label used when an item names no outlet.
pub const DEFAULT_SOURCE: &str = "GoogleNews";

/// Google News client configuration.
#[derive(Debug, Clone)]
pub struct GoogleNewsConfig {
    /// Base URL (default: https://news.google.com).
    pub base_url: String,
    /// Interface language (default: en-IN).
    pub lang: String,
    /// Edition region (default: IN).
    pub region: String,
    /// Request timeout (default: 5s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GoogleNewsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en-IN".to_string(),
            region: "IN".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: AppConfig::default().user_agent,
        }
    }
}

impl From<&AppConfig> for GoogleNewsConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.feed_base_url.clone(),
            lang: config.feed_lang.clone(),
            region: config.feed_region.clone(),
            timeout: config.feed_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Structured-feed news provider backed by Google News RSS search.
#[derive(Debug, Clone)]
pub struct GoogleNewsProvider {
    http: reqwest::Client,
    config: GoogleNewsConfig,
}

impl GoogleNewsProvider {
    pub fn new(config: GoogleNewsConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Build the feed search URL for `query`.
    pub fn search_url(&self, query: &str) -> Result<Url, ProviderError> {
        let lang = &self.config.lang;
        let region = &self.config.region;
        let lang_prefix = lang.split('-').next().unwrap_or(lang);
        let escaped: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();

        let raw = format!(
            "{base}/rss/search?q={escaped}&hl={lang}&gl={region}&ceid={region}:{lang_prefix}",
            base = self.config.base_url.trim_end_matches('/'),
        );

        Url::parse(&raw).map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }
}

/// Map the first `count` linkable feed items to articles.
pub fn articles_from_channel(channel: &rss::Channel, count: usize) -> Vec<Article> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let url = item.link().map(str::trim).filter(|link| !link.is_empty())?;
            let title = item.title().map(str::trim).unwrap_or_default();
            let source = item
                .source()
                .and_then(|s| s.title())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_SOURCE);

            Some(Article::new(title, url, source))
        })
        .take(count)
        .collect()
}

#[async_trait]
impl NewsProvider for GoogleNewsProvider {
    fn name(&self) -> &str {
        "google_news"
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<Article>, ProviderError> {
        if query.trim().is_empty() {
            return Err(ProviderError::InvalidQuery("query cannot be empty".to_string()));
        }

        if count == 0 {
            return Ok(Vec::new());
        }

        let url = self.search_url(query)?;
        tracing::debug!("searching Google News feed: query={}", query);

        let response = self.http.get(url).send().await?;
        ProviderError::check_status(response.status())?;

        let bytes = response.bytes().await?;
        let channel = rss::Channel::read_from(&bytes[..]).map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(articles_from_channel(&channel, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Discovery;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <rss version="2.0">
          <channel>
            <title>"flood" - Google News</title>
            <link>https://news.google.com</link>
            <description>Google News</description>
            <item>
              <title> Flood waters rise in city X </title>
              <link>https://news.example/flood-1</link>
              <source url="https://news.example">Example News</source>
            </item>
            <item>
              <title>Rescue teams deployed</title>
              <link>https://wire.example/rescue</link>
            </item>
            <item>
              <title>No link here</title>
            </item>
            <item>
              <title>Schools closed</title>
              <link>https://daily.example/schools</link>
              <source url="https://daily.example">Daily Example</source>
            </item>
          </channel>
        </rss>"#;

    fn provider_for(server: &MockServer) -> GoogleNewsProvider {
        GoogleNewsProvider::new(GoogleNewsConfig { base_url: server.uri(), ..Default::default() }).unwrap()
    }

    #[test]
    fn test_search_url_params() {
        let provider = GoogleNewsProvider::new(GoogleNewsConfig::default()).unwrap();
        let url = provider.search_url("flood in city X").unwrap();

        assert_eq!(url.host_str(), Some("news.google.com"));
        assert_eq!(url.path(), "/rss/search");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".into(), "flood in city X".into())));
        assert!(pairs.contains(&("hl".into(), "en-IN".into())));
        assert!(pairs.contains(&("gl".into(), "IN".into())));
        assert!(pairs.contains(&("ceid".into(), "IN:en".into())));
    }

    #[test]
    fn test_search_url_escapes_query() {
        let provider = GoogleNewsProvider::new(GoogleNewsConfig::default()).unwrap();
        let url = provider.search_url("a&b=c #1").unwrap();

        let q = url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("a&b=c #1"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_articles_from_channel() {
        let channel = rss::Channel::read_from(FIXTURE_RSS.as_bytes()).unwrap();
        let articles = articles_from_channel(&channel, 10);

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0], Article::new("Flood waters rise in city X", "https://news.example/flood-1", "Example News"));
        assert_eq!(articles[1].source, DEFAULT_SOURCE);
        assert_eq!(articles[2].url, "https://daily.example/schools");
    }

    #[test]
    fn test_articles_from_channel_truncates() {
        let channel = rss::Channel::read_from(FIXTURE_RSS.as_bytes()).unwrap();
        let articles = articles_from_channel(&channel, 2);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].url, "https://wire.example/rescue");
    }

    #[tokio::test]
    async fn test_search_against_mock_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss/search"))
            .and(query_param("q", "flood in city X"))
            .and(query_param("ceid", "IN:en"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE_RSS))
            .expect(1)
            .mount(&server)
            .await;

        let articles = provider_for(&server).search("flood in city X", 4).await.unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].source, "Example News");
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = provider_for(&server).search("flood", 4).await;
        assert!(matches!(result, Err(ProviderError::HttpError { status: 503 })));
    }

    #[tokio::test]
    async fn test_search_malformed_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not a feed</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(provider.search("flood", 4).await, Err(ProviderError::Parse(_))));
        assert!(matches!(provider.discover("flood", 4).await, Discovery::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_search_timeout_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(FIXTURE_RSS)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let provider = GoogleNewsProvider::new(GoogleNewsConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(100),
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(provider.search("flood", 4).await, Err(ProviderError::Timeout)));
        assert!(provider.discover("flood", 4).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let provider = GoogleNewsProvider::new(GoogleNewsConfig::default()).unwrap();
        assert!(matches!(provider.search("   ", 4).await, Err(ProviderError::InvalidQuery(_))));
    }
}
