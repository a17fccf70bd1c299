//! MapQuest radius search request parameters.

use nps_core::Error;

/// Maximum number of places returned per search.
pub const MAX_MATCHES: u32 = 10;

/// Search radius around the origin, in [`UNITS`].
pub const RADIUS: u32 = 10;

/// Miles.
pub const UNITS: &str = "m";

pub const AMBIGUITIES: &str = "ignore";
pub const OUT_FORMAT: &str = "json";

/// Radius search around a postal code.
///
/// Everything except the origin is fixed. The credential is not part of the
/// request; the client appends it when sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesRequest {
    pub origin: String,
}

impl PlacesRequest {
    pub fn new(origin: impl Into<String>) -> Self {
        Self { origin: origin.into().trim().to_string() }
    }

    /// Validate the request parameters.
    pub fn validate(&self) -> Result<(), Error> {
        if self.origin.is_empty() {
            return Err(Error::InvalidInput("origin cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Query parameters without the credential.
    ///
    /// These are also the parameters the cache key is derived from.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("origin", self.origin.clone()),
            ("maxMatches", MAX_MATCHES.to_string()),
            ("ambiguities", AMBIGUITIES.to_string()),
            ("radius", RADIUS.to_string()),
            ("units", UNITS.to_string()),
            ("outFormat", OUT_FORMAT.to_string()),
        ]
    }
}
