//! Configuration for the seeded variant index

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Names whose "The "-stripped alias would collide with ordinary words
pub const DEFAULT_DENYLIST: &[&str] = &[
    "the band",
    "the the",
    "the who",
    "the doors",
    "the cars",
    "the church",
    "the fall",
    "the jam",
    "the police",
    "the beat",
    "the damned",
    "the sound",
    "the music",
    "the national",
];

/// Configuration for the seeded variant index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// How long a built index is served before a lazy rebuild (seconds)
    pub ttl_secs: u64,

    /// Names that never get a "the_stripped" variant
    pub denylist: Vec<String>,

    /// Provenance tag attached to seeded variants
    #[serde(default = "default_provenance")]
    pub provenance: String,
}

fn default_provenance() -> String {
    "seed".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            provenance: default_provenance(),
        }
    }
}

impl IndexConfig {
    /// Get the cache TTL as a Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.provenance.trim().is_empty() {
            return Err("provenance must not be empty".to_string());
        }
        if let Some(entry) = self.denylist.iter().find(|e| e.trim().is_empty()) {
            return Err(format!("denylist contains a blank entry: {:?}", entry));
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
