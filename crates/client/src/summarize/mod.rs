//! Summarizer collaborator.
//!
//! The summarizer receives a fixed system instruction plus the rendered
//! evidence bundle and returns JSON text matching [`ChatAnswer`]. Output that
//! does not parse degrades to [`ChatAnswer::degraded`] instead of failing the
//! request; transport and API failures are reported as [`SummarizeError`].

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiSummarizer};

use std::sync::Arc;

use async_trait::async_trait;
use newsdesk_core::{ChatAnswer, EvidenceDoc};

/// Instruction sent as the system message of every summarization.
pub const SYSTEM_PROMPT: &str = "You are a news research assistant. Summarize the incident ONLY from the provided sources; \
be precise with dates/numbers; note contradictions if any; \
Return JSON: {answer: string (2-5 sentences), highlights: string[3], sources: string[] as 'Outlet: URL'}.";

/// Errors from the summarizer service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SummarizeError {
    /// Rejected credentials.
    #[error("authentication failed: invalid API key")]
    Auth,

    /// Non-success API response.
    #[error("API error: status {status}")]
    Api { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The response envelope could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The response carried no message content.
    #[error("empty response: no message content")]
    EmptyResponse,
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SummarizeError::Timeout } else { SummarizeError::Network(Arc::new(err)) }
    }
}

/// Render the evidence bundle: one `Source/Title/URL/Text` block per document,
/// separated by a blank line, in the given order.
pub fn render_bundle(docs: &[EvidenceDoc]) -> String {
    docs.iter().map(EvidenceDoc::render).collect::<Vec<_>>().join("\n\n")
}

/// Parse summarizer output, degrading to the raw text when it is not a valid answer object.
pub fn parse_answer(raw: &str) -> ChatAnswer {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value @ serde_json::Value::Object(_)) => match serde_json::from_value::<ChatAnswer>(value) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "summarizer answer has unexpected field types, degrading");
                ChatAnswer::degraded(raw)
            }
        },
        Ok(_) => {
            tracing::warn!("summarizer output is not a JSON object, degrading");
            ChatAnswer::degraded(raw)
        }
        Err(e) => {
            tracing::warn!(error = %e, "summarizer output is not JSON, degrading");
            ChatAnswer::degraded(raw)
        }
    }
}

/// A service that condenses an evidence bundle into an answer.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Model or service label used in logs.
    fn model_name(&self) -> &str;

    /// Send the instruction and evidence text, returning the raw reply.
    async fn complete(&self, system: &str, evidence: &str) -> Result<String, SummarizeError>;

    /// Summarize the evidence bundle.
    async fn summarize(&self, docs: &[EvidenceDoc]) -> Result<ChatAnswer, SummarizeError> {
        tracing::debug!(model = self.model_name(), docs = docs.len(), "summarizing evidence");
        let raw = self.complete(SYSTEM_PROMPT, &render_bundle(docs)).await?;
        Ok(parse_answer(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::Article;

    #[test]
    fn test_render_bundle() {
        let docs = vec![
            EvidenceDoc::from_article(&Article::new("First", "https://a.example/1", "A"), "alpha"),
            EvidenceDoc::from_article(&Article::new("Second", "https://b.example/2", "B"), ""),
        ];

        assert_eq!(
            render_bundle(&docs),
            "Source: A\nTitle: First\nURL: https://a.example/1\nText: alpha\n\n\
             Source: B\nTitle: Second\nURL: https://b.example/2\nText: "
        );
    }

    #[test]
    fn test_render_empty_bundle() {
        assert_eq!(render_bundle(&[]), "");
    }

    #[test]
    fn test_parse_answer_valid() {
        let raw = r#"{"answer": "Rain flooded the city.", "highlights": ["a", "b", "c"], "sources": ["A: https://a.example/1"]}"#;
        let answer = parse_answer(raw);

        assert_eq!(answer.answer, "Rain flooded the city.");
        assert_eq!(answer.highlights, vec!["a", "b", "c"]);
        assert_eq!(answer.sources, vec!["A: https://a.example/1"]);
    }

    #[test]
    fn test_parse_answer_not_json() {
        let answer = parse_answer("Sorry, here is a summary in prose.");
        assert_eq!(answer, ChatAnswer::degraded("Sorry, here is a summary in prose."));
    }

    #[test]
    fn test_parse_answer_not_an_object() {
        let answer = parse_answer(r#"["answer", [], []]"#);
        assert_eq!(answer.answer, r#"["answer", [], []]"#);
        assert!(answer.highlights.is_empty());
    }

    #[test]
    fn test_parse_answer_wrong_field_types() {
        let raw = r#"{"answer": "ok", "highlights": "not a list"}"#;
        assert_eq!(parse_answer(raw), ChatAnswer::degraded(raw));
    }

    #[test]
    fn test_system_prompt_names_output_shape() {
        assert!(SYSTEM_PROMPT.contains("highlights: string[3]"));
        assert!(SYSTEM_PROMPT.contains("'Outlet: URL'"));
    }
}
