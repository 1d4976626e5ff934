//! Unified error types for newsdesk.
//!
//! Only the variants here ever reach the HTTP front-end. Provider, scrape and
//! malformed-summary failures are absorbed by the components that produce them.

/// Unified error types for the newsdesk pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid request parameters (e.g., blank query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Neither news provider returned a single article for the query.
    #[error("NO_ARTICLES: no articles found from providers for {0:?}")]
    NoArticlesFound(String),

    /// Summarizer credentials are not configured.
    #[error("MISSING_CREDENTIALS: {0}")]
    MissingCredentials(String),

    /// The summarizer call itself failed (transport or API error).
    #[error("SUMMARIZER_FAILED: {0}")]
    SummarizerFailed(String),
}

impl Error {
    /// HTTP status code the front-end answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::NoArticlesFound(_) => 502,
            Error::MissingCredentials(_) => 500,
            Error::SummarizerFailed(_) => 500,
        }
    }

    /// Human-readable detail without the machine code prefix.
    pub fn detail(&self) -> String {
        match self {
            Error::NoArticlesFound(_) => "No articles found from providers.".to_string(),
            Error::InvalidInput(msg) | Error::MissingCredentials(msg) | Error::SummarizerFailed(msg) => msg.clone(),
        }
    }
}
