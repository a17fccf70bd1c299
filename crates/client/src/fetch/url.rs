//! URL checks for outgoing requests and scraped links.

use url::Url;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a request URL, accepting only http(s), and drop any fragment.
///
/// The query string is left exactly as given.
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    parsed.set_fragment(None);
    Ok(parsed)
}

/// Resolve a scraped `href` against the site root.
///
/// Site-relative paths such as `/state/mi/index.htm` are prefixed with the
/// base host; absolute links are returned as-is.
pub fn resolve_href(base: &Url, href: &str) -> Result<String, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    base.join(href).map(String::from).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}
