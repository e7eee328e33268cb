//! App state: registry, service façade, config.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kennel_core::constants::{BODY_LIMIT_OVERHEAD, DEFAULT_MAX_IMAGE_BYTES};
use kennel_core::error::{KennelError, Result};
use kennel_core::types::MatchMode;
use kennel_registry::MemoryRegistry;

use crate::service::PetService;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Largest accepted image payload in bytes
    pub max_image_bytes: usize,
    /// Deadline applied to each search, if any
    pub search_timeout: Option<Duration>,
    /// Mode used when a search request does not name one
    pub default_match_mode: MatchMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            search_timeout: None,
            default_match_mode: MatchMode::Any,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment, reading `.env` if present.
    ///
    /// - `KENNEL_MAX_IMAGE_BYTES`
    /// - `KENNEL_SEARCH_TIMEOUT_MS`
    /// - `KENNEL_MATCH_MODE` (`any` or `all`)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_image_bytes = match lookup("KENNEL_MAX_IMAGE_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                KennelError::ConfigError(format!("KENNEL_MAX_IMAGE_BYTES is not a size: {raw}"))
            })?,
            None => defaults.max_image_bytes,
        };

        let search_timeout = match lookup("KENNEL_SEARCH_TIMEOUT_MS") {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    KennelError::ConfigError(format!(
                        "KENNEL_SEARCH_TIMEOUT_MS is not a number: {raw}"
                    ))
                })?;
                Some(Duration::from_millis(millis))
            }
            None => defaults.search_timeout,
        };

        let default_match_mode = match lookup("KENNEL_MATCH_MODE") {
            Some(raw) => raw.parse()?,
            None => defaults.default_match_mode,
        };

        Ok(Self {
            max_image_bytes,
            search_timeout,
            default_match_mode,
        })
    }

    /// Largest request body the server accepts.
    ///
    /// Images travel hex-encoded, so the body can be twice the image size.
    pub fn body_limit(&self) -> usize {
        self.max_image_bytes
            .saturating_mul(2)
            .saturating_add(BODY_LIMIT_OVERHEAD)
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Active configuration
    pub config: ApiConfig,
    /// Backing store
    pub registry: Arc<MemoryRegistry>,
    /// Register/search façade over the registry
    pub service: PetService,
    /// When the state was built, i.e. server start
    pub started_at: Instant,
}

impl AppState {
    /// Creates state with an empty registry.
    pub fn new(config: ApiConfig) -> Self {
        let registry = Arc::new(MemoryRegistry::new());
        let service = PetService::new(registry.clone(), &config);

        Self {
            config,
            registry,
            service,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert!(config.search_timeout.is_none());
        assert_eq!(config.default_match_mode, MatchMode::Any);
    }

    #[test]
    fn test_values_from_env() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("KENNEL_MAX_IMAGE_BYTES", "1024"),
            ("KENNEL_SEARCH_TIMEOUT_MS", "250"),
            ("KENNEL_MATCH_MODE", "all"),
        ]))
        .unwrap();

        assert_eq!(config.max_image_bytes, 1024);
        assert_eq!(config.search_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.default_match_mode, MatchMode::All);
        assert_eq!(config.body_limit(), 2048 + BODY_LIMIT_OVERHEAD);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ApiConfig::from_lookup(lookup(&[("KENNEL_MAX_IMAGE_BYTES", "lots")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("KENNEL_SEARCH_TIMEOUT_MS", "-1")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("KENNEL_MATCH_MODE", "some")])).is_err());
    }
}
