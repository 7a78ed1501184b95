//! Configuration for identity resolution

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DAY_SECS: u64 = 86_400;

/// Default MusicBrainz web service root
pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Default User-Agent sent to the registry
pub const DEFAULT_USER_AGENT: &str = "tributary/0.1.0 ( https://github.com/your-org/tributary )";

/// Configuration for the identity resolver and its HTTP registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Registry web service root
    pub base_url: String,

    /// User-Agent header
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Minimum spacing between outbound requests (milliseconds)
    pub min_interval_ms: u64,

    /// Pause before the single retry of a transient failure (milliseconds)
    pub retry_backoff_ms: u64,

    /// Lowest search score (0-100) accepted as a match
    pub score_threshold: u32,

    /// Name to id TTL after a successful resolution (seconds)
    pub name_positive_ttl_secs: u64,

    /// Name to id TTL after a failed resolution (seconds)
    pub name_negative_ttl_secs: u64,

    /// Id to name TTL after a successful lookup (seconds)
    pub id_positive_ttl_secs: u64,

    /// Id to name TTL after a failed lookup (seconds)
    pub id_negative_ttl_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            min_interval_ms: 1000,
            retry_backoff_ms: 400,
            score_threshold: 85,
            name_positive_ttl_secs: 14 * DAY_SECS,
            name_negative_ttl_secs: DAY_SECS,
            id_positive_ttl_secs: 60 * DAY_SECS,
            id_negative_ttl_secs: 7 * DAY_SECS,
        }
    }
}

impl ResolverConfig {
    /// Preset for tests and local registries: no spacing, no backoff
    pub fn unthrottled() -> Self {
        Self {
            min_interval_ms: 0,
            retry_backoff_ms: 0,
            ..Self::default()
        }
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Minimum request spacing as a Duration
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Retry backoff as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.score_threshold > 100 {
            return Err(format!("score_threshold {} exceeds 100", self.score_threshold));
        }
        if self.name_negative_ttl_secs > self.name_positive_ttl_secs {
            return Err("name_negative_ttl_secs cannot exceed name_positive_ttl_secs".to_string());
        }
        if self.id_negative_ttl_secs > self.id_positive_ttl_secs {
            return Err("id_negative_ttl_secs cannot exceed id_positive_ttl_secs".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
