//! News data model shared by the providers, the pipeline and the front-end.

use serde::{Deserialize, Serialize};

/// A candidate article returned by a news-discovery provider.
///
/// The URL is the identity of an article: two articles with the same URL are
/// duplicates, regardless of which provider produced them. No normalization is
/// applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), source: source.into() }
    }
}

/// An article enriched with the text scraped from its page.
///
/// `text` is empty when the page could not be fetched or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDoc {
    pub source: String,
    pub title: String,
    pub url: String,
    pub text: String,
}

impl EvidenceDoc {
    /// Join an article with its scraped text.
    pub fn from_article(article: &Article, text: impl Into<String>) -> Self {
        Self {
            source: article.source.clone(),
            title: article.title.clone(),
            url: article.url.clone(),
            text: text.into(),
        }
    }

    /// Render the document as a `Source/Title/URL/Text` block.
    pub fn render(&self) -> String {
        format!("Source: {}\nTitle: {}\nURL: {}\nText: {}", self.source, self.title, self.url, self.text)
    }
}

/// Answer returned to the caller of `/chat` and stored in the result cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// Short prose summary of the incident.
    #[serde(default)]
    pub answer: String,
    /// Key points, normally three.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Cited sources as `Outlet: URL`.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatAnswer {
    /// Best-effort answer carrying unparseable summarizer output verbatim.
    pub fn degraded(raw: impl Into<String>) -> Self {
        Self { answer: raw.into(), highlights: Vec::new(), sources: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_from_article() {
        let article = Article::new("Flooding hits city", "https://example.com/flood", "Example Times");
        let doc = EvidenceDoc::from_article(&article, "Water levels rose overnight.");

        assert_eq!(doc.source, "Example Times");
        assert_eq!(doc.title, "Flooding hits city");
        assert_eq!(doc.url, "https://example.com/flood");
        assert_eq!(doc.text, "Water levels rose overnight.");
    }

    #[test]
    fn test_evidence_render() {
        let article = Article::new("T", "https://a.example/1", "A");
        let doc = EvidenceDoc::from_article(&article, "");
        assert_eq!(doc.render(), "Source: A\nTitle: T\nURL: https://a.example/1\nText: ");
    }

    #[test]
    fn test_chat_answer_missing_fields_default() {
        let answer: ChatAnswer = serde_json::from_str(r#"{"answer": "Only prose"}"#).unwrap();
        assert_eq!(answer.answer, "Only prose");
        assert!(answer.highlights.is_empty());
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_chat_answer_degraded() {
        let answer = ChatAnswer::degraded("not json");
        assert_eq!(answer.answer, "not json");
        assert!(answer.highlights.is_empty());
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_chat_answer_serialization_shape() {
        let answer = ChatAnswer {
            answer: "a".into(),
            highlights: vec!["h1".into(), "h2".into(), "h3".into()],
            sources: vec!["Outlet: https://example.com".into()],
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["answer"], "a");
        assert_eq!(json["highlights"].as_array().unwrap().len(), 3);
        assert_eq!(json["sources"][0], "Outlet: https://example.com");
    }
}
