//! Converter configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// What to do when a class name is already registered for another kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameConflictPolicy {
    /// Fail the conversion with [`Error::ClassNameConflict`]
    #[default]
    Fail,
    /// Keep the class registered first and reference it
    ReuseFirst,
}

/// Converter configuration
///
/// Only the conflict policy is configurable; element naming is fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Class name conflict handling
    pub name_conflict: NameConflictPolicy,
}

impl ConverterConfig {
    /// Load configuration from a file; `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::InvalidConfig`] if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        trace!("Loading converter configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Load configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("JSON parse error: {e}")))
    }

    /// Load configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidConfig(format!("YAML parse error: {e}")))
    }

    #[must_use]
    pub fn with_name_conflict(mut self, policy: NameConflictPolicy) -> Self {
        self.name_conflict = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.name_conflict, NameConflictPolicy::Fail);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"name_conflict": "reuse_first"}"#;
        let config = ConverterConfig::from_json(json).unwrap();
        assert_eq!(config.name_conflict, NameConflictPolicy::ReuseFirst);
    }

    #[test]
    fn test_from_json_missing_fields_use_defaults() {
        let config = ConverterConfig::from_json("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "name_conflict: reuse_first\n";
        let config = ConverterConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name_conflict, NameConflictPolicy::ReuseFirst);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result = ConverterConfig::from_json(r#"{"name_conflict": "merge"}"#);
        match result {
            Err(Error::InvalidConfig(message)) => assert!(message.contains("JSON parse error")),
            other => panic!("Expected InvalidConfig error, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_naming_is_not_configurable() {
        let result = ConverterConfig::from_json(r#"{"segment_reference_names": "tag"}"#);
        match result {
            Err(Error::InvalidConfig(message)) => {
                assert!(message.contains("segment_reference_names"));
            }
            other => panic!("Expected InvalidConfig error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let result = ConverterConfig::from_yaml("name_conflict: [");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_setters() {
        let config = ConverterConfig::default().with_name_conflict(NameConflictPolicy::ReuseFirst);
        assert_eq!(config.name_conflict, NameConflictPolicy::ReuseFirst);
    }
}
