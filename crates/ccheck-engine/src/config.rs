//! Checker configuration
//!
//! Loaded from TOML; every field has a default, so an empty document is a
//! valid configuration.
//!
//! ```toml
//! deny_redeclaration = true
//! library_identifiers = ["printf", "scanf"]
//!
//! [suggestions]
//! enabled = true
//! max_states = 10000
//! scope = "visible"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::suggest::DEFAULT_MAX_STATES;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("suggestions.max_states must be at least 1")]
    ZeroStateCap,
}

/// Which names are candidates for "did you mean" suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionScope {
    /// Every name successfully declared so far in the run, even if its
    /// scope has been left
    #[default]
    Persistent,
    /// Only names in scope layers reachable at the point of use
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionConfig {
    pub enabled: bool,
    /// Cap on states explored by one fuzzy search
    pub max_states: usize,
    pub scope: SuggestionScope,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_states: DEFAULT_MAX_STATES,
            scope: SuggestionScope::Persistent,
        }
    }
}

/// Options for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Report same-scope redeclarations as errors instead of warnings
    pub deny_redeclaration: bool,
    /// Names registered as library functions before parsing
    pub library_identifiers: Vec<String>,
    pub suggestions: SuggestionConfig,
}

impl CheckConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CheckConfig = toml::from_str(text)?;
        if config.suggestions.max_states == 0 {
            return Err(ConfigError::ZeroStateCap);
        }
        Ok(config)
    }

    /// Strict mode: redeclarations are errors
    pub fn strict() -> Self {
        Self {
            deny_redeclaration: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = CheckConfig::from_toml_str("").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert!(config.suggestions.enabled);
        assert_eq!(config.suggestions.max_states, 10_000);
        assert_eq!(config.suggestions.scope, SuggestionScope::Persistent);
    }

    #[test]
    fn test_full_document() {
        let config = CheckConfig::from_toml_str(
            r#"
            deny_redeclaration = true
            library_identifiers = ["printf", "puts"]

            [suggestions]
            enabled = false
            max_states = 500
            scope = "visible"
            "#,
        )
        .unwrap();

        assert!(config.deny_redeclaration);
        assert_eq!(config.library_identifiers, vec!["printf", "puts"]);
        assert!(!config.suggestions.enabled);
        assert_eq!(config.suggestions.max_states, 500);
        assert_eq!(config.suggestions.scope, SuggestionScope::Visible);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CheckConfig::from_toml_str("deny_everything = true").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_zero_state_cap_rejected() {
        let err = CheckConfig::from_toml_str("[suggestions]\nmax_states = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroStateCap));
    }

    #[test]
    fn test_strict() {
        assert!(CheckConfig::strict().deny_redeclaration);
    }
}
