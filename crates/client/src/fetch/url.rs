//! URL canonicalization applied before a page is fetched.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize an article URL for fetching.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Reject anything but http/https
/// 4. Lowercase the host
/// 5. Remove fragment (#...)
/// 6. Keep query string intact (do not reorder)
///
/// Article identity is the URL as the provider returned it; this form is only
/// what goes on the wire.
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("news.example/story").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("news.example"));
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://NEWS.Example/Story").unwrap();
        assert_eq!(url.host_str(), Some("news.example"));
        assert_eq!(url.path(), "/Story");
    }

    #[test]
    fn test_canonicalize_keeps_query_drops_fragment() {
        let url = canonicalize("https://news.example/a?id=7&utm=x#comments").unwrap();
        assert_eq!(url.query(), Some("id=7&utm=x"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        assert!(matches!(canonicalize("ftp://news.example/file"), Err(UrlError::UnsupportedScheme(_))));
        assert!(matches!(canonicalize("file:///etc/hosts"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_canonicalize_http_allowed() {
        let url = canonicalize("http://news.example").unwrap();
        assert_eq!(url.scheme(), "http");
    }
}
