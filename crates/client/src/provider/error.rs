//! News provider error types.
//!
//! These never leave the provider layer: [`NewsProvider::discover`](super::NewsProvider::discover)
//! turns them into [`Discovery::Unavailable`](super::Discovery::Unavailable).

use std::sync::Arc;

/// Errors from a single news-discovery request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Empty or otherwise unusable query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The provider URL could not be built.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the provider.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Non-success HTTP status.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not the expected feed or JSON document.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

impl ProviderError {
    /// Map a response status to an error, passing successes through.
    pub fn check_status(status: reqwest::StatusCode) -> Result<(), ProviderError> {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            return Err(ProviderError::HttpError { status: status.as_u16() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_display() {
        let err = ProviderError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));

        let err = ProviderError::Parse("unexpected EOF".to_string());
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn test_check_status() {
        assert!(ProviderError::check_status(StatusCode::OK).is_ok());
        assert!(matches!(ProviderError::check_status(StatusCode::TOO_MANY_REQUESTS), Err(ProviderError::RateLimited)));
        assert!(matches!(
            ProviderError::check_status(StatusCode::BAD_GATEWAY),
            Err(ProviderError::HttpError { status: 502 })
        ));
        assert!(matches!(
            ProviderError::check_status(StatusCode::NOT_FOUND),
            Err(ProviderError::HttpError { status: 404 })
        ));
    }
}
