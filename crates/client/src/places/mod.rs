//! MapQuest nearby-places client.
//!
//! ### Behaviour
//!
//! - **Endpoint**: `http://www.mapquestapi.com/search/v2/radius` (configurable)
//! - **Authentication**: `key` query parameter, injected through [`PlacesConfig`].
//! - **Caching**: responses are stored under a canonical key built from the
//!   request parameters. The credential is not part of the key.
//! - **Status**: a non-zero `info.statuscode` fails the call and nothing is cached.

pub mod request;
pub mod response;

pub use request::PlacesRequest;
pub use response::{NearbyPlace, PlacesApiResponse, check_status, parse_places};

use nps_core::{AppConfig, CacheStore, Error, canonical_key};

use crate::fetch::Fetcher;

/// Default MapQuest radius search endpoint.
const DEFAULT_BASE_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Places client configuration.
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    /// Radius search endpoint (default: MapQuest).
    pub base_url: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self { api_key: String::new(), base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig").field("api_key", &"<redacted>").field("base_url", &self.base_url).finish()
    }
}

impl TryFrom<&AppConfig> for PlacesConfig {
    type Error = Error;

    fn try_from(config: &AppConfig) -> Result<Self, Error> {
        let api_key = config.require_mapquest_api_key().map_err(|e| Error::PlacesAuth(e.to_string()))?;
        Ok(Self { api_key: api_key.to_string(), base_url: config.places_url.clone() })
    }
}

/// Nearby-places client.
pub struct PlacesClient<F> {
    fetcher: F,
    config: PlacesConfig,
}

impl<F: Fetcher> PlacesClient<F> {
    /// Create a new client. Fails if the API key is empty.
    pub fn new(fetcher: F, config: PlacesConfig) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::PlacesAuth("missing MapQuest API key".to_string()));
        }

        Ok(Self { fetcher, config })
    }

    /// Cache key for a request.
    ///
    /// The `key` credential is left out so `cache.json` never holds it. Two
    /// clients with different API keys therefore share cache entries.
    pub fn cache_key(&self, req: &PlacesRequest) -> String {
        canonical_key(&self.config.base_url, req.params())
    }

    /// Places within the fixed radius of `postal_code`, through the cache.
    pub async fn fetch_nearby(&self, cache: &mut CacheStore, postal_code: &str) -> Result<Vec<NearbyPlace>, Error> {
        let req = PlacesRequest::new(postal_code);
        req.validate()?;

        let key = self.cache_key(&req);
        let mut query = req.params();
        query.push(("key", self.config.api_key.clone()));

        tracing::debug!(origin = %req.origin, "searching nearby places");

        let fetcher = &self.fetcher;
        let url = self.config.base_url.as_str();
        let query = query.as_slice();
        let body = cache
            .get_or_fetch(&key, || async move {
                let body = fetcher.get_json(url, query).await?;
                check_status(&body)?;
                Ok::<_, Error>(body)
            })
            .await?;

        parse_places(body)
    }
}
