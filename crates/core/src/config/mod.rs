//! Runtime settings for the explorer.
//!
//! Values come from three figment layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. the TOML file named by `NPS_CONFIG_FILE`, if set
//! 3. `NPS_*` environment variables

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

const ENV_PREFIX: &str = "NPS_";
const CONFIG_FILE_VAR: &str = "NPS_CONFIG_FILE";

pub const DEFAULT_CACHE_PATH: &str = "cache.json";
pub const DEFAULT_BASE_URL: &str = "https://www.nps.gov";
pub const DEFAULT_PLACES_URL: &str = "http://www.mapquestapi.com/search/v2/radius";
pub const DEFAULT_USER_AGENT: &str = "nps-explorer/0.1";

/// Explorer settings. Field `x` is overridden by `NPS_X`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// MapQuest key for nearby searches. Only checked when a search runs,
    /// see [`AppConfig::require_mapquest_api_key`]. Keep it in the
    /// environment or an untracked config file.
    pub mapquest_api_key: Option<String>,

    /// JSON cache file, created on first write.
    pub cache_path: PathBuf,

    /// Root of the park directory site.
    pub base_url: String,

    /// MapQuest radius search endpoint.
    pub places_url: String,

    pub user_agent: String,

    /// Sent as the `From` header when set.
    pub contact: Option<String>,

    /// Per-response body limit.
    pub max_bytes: usize,

    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mapquest_api_key: None,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            places_url: DEFAULT_PLACES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            contact: None,
            max_bytes: 5 * 1024 * 1024,
            timeout_ms: 20_000,
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Read every layer and validate the result.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadFailed` when a layer cannot be read or a value has the
    /// wrong type, `ConfigError::Invalid` when [`AppConfig::validate`] rejects it.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
            figment = figment.merge(Toml::file(path));
        }

        let env = Env::prefixed(ENV_PREFIX)
            .ignore(&["CONFIG_FILE"])
            .map(|key| key.as_str().to_lowercase().into())
            .split("__");

        Self::from_figment(figment.merge(env))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The MapQuest key, for callers that cannot proceed without it.
    ///
    /// # Errors
    ///
    /// `ConfigError::Missing` if the key is unset or blank.
    pub fn require_mapquest_api_key(&self) -> Result<&str, ConfigError> {
        self.mapquest_api_key.as_deref().filter(|key| !key.trim().is_empty()).ok_or_else(|| ConfigError::Missing {
            field: "mapquest_api_key".into(),
            hint: "Set NPS_MAPQUEST_API_KEY environment variable".into(),
        })
    }
}
