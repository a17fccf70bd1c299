//! Unified error types for nps-explorer.
//!
//! Every variant renders as `CODE: detail` so the interactive loop can print
//! failures verbatim.

use std::io;
use std::path::PathBuf;

/// Unified error type shared by the cache, the clients and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty postal code).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A mandatory element was absent from a scraped page.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or network failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Places API rejected the credential.
    #[error("PLACES_AUTH_ERROR: {0}")]
    PlacesAuth(String),

    /// Places API answered with a non-zero status code.
    #[error("PLACES_API_ERROR: {0}")]
    PlacesApi(String),

    /// A response body could not be decoded.
    #[error("PARSE_ERROR: {0}")]
    Parse(String),

    /// The cache file could not be written.
    #[error("CACHE_ERROR: {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A cached value does not have the shape its caller expects.
    #[error("CACHE_ERROR: unexpected entry for {0}")]
    CacheEntry(String),
}

impl Error {
    /// Whether the error must end the session rather than just the current operation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CacheIo { .. })
    }
}
