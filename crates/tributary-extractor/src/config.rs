//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Emit every person/organization entity as a candidate, cue or not
    pub include_entities: bool,

    /// Resolve candidates against the identity registry
    pub resolve_identities: bool,

    /// How far (characters) after an organization to look for a role word
    pub entity_window_chars: usize,
}

impl Default for ExtractorConfig {
    /// Cue candidates and literal matches, resolved
    fn default() -> Self {
        Self {
            include_entities: false,
            resolve_identities: true,
            entity_window_chars: 40,
        }
    }
}

impl ExtractorConfig {
    /// Offline preset: no registry calls
    pub fn offline() -> Self {
        Self {
            resolve_identities: false,
            ..Self::default()
        }
    }

    /// Thorough preset: adds the raw entity pass
    pub fn thorough() -> Self {
        Self {
            include_entities: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.entity_window_chars == 0 {
            return Err("entity_window_chars must be greater than 0".to_string());
        }
        if self.entity_window_chars > 1_000 {
            return Err("entity_window_chars cannot exceed 1000".to_string());
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
