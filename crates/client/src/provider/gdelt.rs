//! GDELT DOC 2.0 article search provider.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://api.gdeltproject.org/api/v2/doc/doc`
//! - **Parameters**: `query`, `maxrecords`, `format=json`, `sort=datedesc`.
//! - **Authentication**: none.
//! - **Normalization**: each record of `articles` becomes an [`Article`]; the
//!   outlet is `domain`, then `sourceCommonName`, then [`DEFAULT_SOURCE`].

use std::time::Duration;

use async_trait::async_trait;
use newsdesk_core::{AppConfig, Article};
use serde::{Deserialize, Serialize};

use super::{NewsProvider, ProviderError};

/// Default base URL for the GDELT API.
const DEFAULT_BASE_URL: &str = "https://api.gdeltproject.org";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Source label used when a record carries no outlet metadata.
pub const DEFAULT_SOURCE: &str = "GDELT";

/// GDELT client configuration.
#[derive(Debug, Clone)]
pub struct GdeltConfig {
    /// Base URL (default: https://api.gdeltproject.org).
    pub base_url: String,
    /// Request timeout (default: 6s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GdeltConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: AppConfig::default().user_agent,
        }
    }
}

impl From<&AppConfig> for GdeltConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.search_base_url.clone(),
            timeout: config.search_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Query string sent to the DOC API.
#[derive(Debug, Serialize)]
struct DocQuery<'a> {
    query: &'a str,
    maxrecords: usize,
    format: &'static str,
    sort: &'static str,
}

/// Raw response from the DOC API. An empty result set comes back as `{}`.
#[derive(Debug, Deserialize)]
pub struct DocResponse {
    #[serde(default)]
    pub articles: Vec<DocArticle>,
}

/// Individual article record from GDELT.
#[derive(Debug, Deserialize)]
pub struct DocArticle {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "sourceCommonName")]
    pub source_common_name: Option<String>,
}

impl DocResponse {
    /// Normalize the first `count` records that carry a URL.
    pub fn into_articles(self, count: usize) -> Vec<Article> {
        self.articles
            .into_iter()
            .filter_map(|record| {
                let url = record.url.filter(|u| !u.trim().is_empty())?;
                let source = [record.domain, record.source_common_name]
                    .into_iter()
                    .flatten()
                    .find(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

                Some(Article::new(record.title.unwrap_or_default(), url, source))
            })
            .take(count)
            .collect()
    }
}

/// JSON-search news provider backed by the GDELT DOC API.
#[derive(Debug, Clone)]
pub struct GdeltProvider {
    http: reqwest::Client,
    config: GdeltConfig,
}

impl GdeltProvider {
    pub fn new(config: GdeltConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl NewsProvider for GdeltProvider {
    fn name(&self) -> &str {
        "gdelt"
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<Article>, ProviderError> {
        if query.trim().is_empty() {
            return Err(ProviderError::InvalidQuery("query cannot be empty".to_string()));
        }

        if count == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/v2/doc/doc", self.config.base_url.trim_end_matches('/'));
        let params = DocQuery { query, maxrecords: count, format: "json", sort: "datedesc" };

        tracing::debug!("searching GDELT: query={}", query);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await?;
        ProviderError::check_status(response.status())?;

        let bytes = response.bytes().await?;
        let doc: DocResponse = serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(doc.into_articles(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE_JSON: &str = r#"{
        "articles": [
            {
                "url": "https://wire.example/flood",
                "title": "Flood update",
                "seendate": "20250101T120000Z",
                "domain": "wire.example",
                "sourcecountry": "India"
            },
            {
                "url": "https://paper.example/relief",
                "title": "Relief camps open",
                "sourceCommonName": "The Paper"
            },
            {
                "title": "Missing url"
            },
            {
                "url": "https://blog.example/live",
                "domain": ""
            }
        ]
    }"#;

    fn provider_for(server: &MockServer) -> GdeltProvider {
        GdeltProvider::new(GdeltConfig { base_url: server.uri(), ..Default::default() }).unwrap()
    }

    #[test]
    fn test_into_articles() {
        let doc: DocResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let articles = doc.into_articles(10);

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0], Article::new("Flood update", "https://wire.example/flood", "wire.example"));
        assert_eq!(articles[1].source, "The Paper");
        assert_eq!(articles[2].source, DEFAULT_SOURCE);
        assert_eq!(articles[2].title, "");
    }

    #[test]
    fn test_into_articles_truncates() {
        let doc: DocResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(doc.into_articles(1).len(), 1);
    }

    #[test]
    fn test_empty_object_response() {
        let doc: DocResponse = serde_json::from_str("{}").unwrap();
        assert!(doc.into_articles(4).is_empty());
    }

    #[tokio::test]
    async fn test_search_against_mock_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/doc/doc"))
            .and(query_param("query", "flood in city X"))
            .and(query_param("maxrecords", "4"))
            .and(query_param("format", "json"))
            .and(query_param("sort", "datedesc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let articles = provider_for(&server).search("flood in city X", 4).await.unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].url, "https://wire.example/flood");
    }

    #[tokio::test]
    async fn test_search_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        assert!(matches!(provider_for(&server).search("flood", 4).await, Err(ProviderError::RateLimited)));
    }

    #[tokio::test]
    async fn test_search_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Please limit requests to one every 5 seconds"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(provider.search("flood", 4).await, Err(ProviderError::Parse(_))));
        assert!(provider.discover("flood", 4).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_unreachable_host() {
        let provider =
            GdeltProvider::new(GdeltConfig { base_url: "http://127.0.0.1:1".to_string(), ..Default::default() })
                .unwrap();

        let result = provider.search("flood", 4).await;
        assert!(matches!(result, Err(ProviderError::Network(_)) | Err(ProviderError::Timeout)));
    }
}
