//! Post-load checks on `AppConfig`.

use std::ops::RangeInclusive;

use crate::config::AppConfig;
use thiserror::Error;

const MAX_BYTES_RANGE: RangeInclusive<usize> = 1..=50 * 1024 * 1024;
const TIMEOUT_MS_RANGE: RangeInclusive<u64> = 100..=300_000;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field: field.to_string(), reason: reason.into() }
    }
}

impl AppConfig {
    /// Check loaded values.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the first offending field:
    /// - `max_bytes` outside 1 byte ..= 50MB
    /// - `timeout_ms` outside 100 ..= 300000
    /// - empty `user_agent` or `cache_path`
    /// - `base_url` or `places_url` not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        in_range("max_bytes", self.max_bytes, MAX_BYTES_RANGE)?;
        in_range("timeout_ms", self.timeout_ms, TIMEOUT_MS_RANGE)?;

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("user_agent", "must not be empty"));
        }
        if self.cache_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("cache_path", "must not be empty"));
        }

        http_url("base_url", &self.base_url)?;
        http_url("places_url", &self.places_url)
    }
}

fn in_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} not in {}..={}", range.start(), range.end())))
    }
}

fn http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::invalid(field, e.to_string()))?;

    if matches!(parsed.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("unsupported scheme: {}", parsed.scheme())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn invalid_field(config: AppConfig) -> Option<String> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let low = AppConfig { max_bytes: 1, timeout_ms: 100, ..Default::default() };
        let high = AppConfig { max_bytes: 50 * 1024 * 1024, timeout_ms: 300_000, ..Default::default() };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_numbers() {
        assert_eq!(invalid_field(AppConfig { max_bytes: 0, ..Default::default() }).as_deref(), Some("max_bytes"));
        assert_eq!(
            invalid_field(AppConfig { max_bytes: 51 * 1024 * 1024, ..Default::default() }).as_deref(),
            Some("max_bytes")
        );
        assert_eq!(invalid_field(AppConfig { timeout_ms: 99, ..Default::default() }).as_deref(), Some("timeout_ms"));
        assert_eq!(
            invalid_field(AppConfig { timeout_ms: 300_001, ..Default::default() }).as_deref(),
            Some("timeout_ms")
        );
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(invalid_field(AppConfig { user_agent: " ".into(), ..Default::default() }).as_deref(), Some("user_agent"));
        assert_eq!(
            invalid_field(AppConfig { cache_path: PathBuf::new(), ..Default::default() }).as_deref(),
            Some("cache_path")
        );
    }

    #[test]
    fn test_urls_must_be_http() {
        assert_eq!(invalid_field(AppConfig { base_url: "www.nps.gov".into(), ..Default::default() }).as_deref(), Some("base_url"));
        assert_eq!(
            invalid_field(AppConfig { places_url: "ftp://mapquestapi.com/radius".into(), ..Default::default() }).as_deref(),
            Some("places_url")
        );
    }

    #[test]
    fn test_reason_names_the_range() {
        let err = AppConfig { timeout_ms: 5, ..Default::default() }.validate().unwrap_err();
        assert!(err.to_string().contains("5 not in 100..=300000"));
    }
}
