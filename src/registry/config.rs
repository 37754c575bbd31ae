//! Values configuration file parsing.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::resolver::ValueRequest;
use crate::error::ConfigError;

/// Which built-in sources to keep.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    /// Paths removed from the registry at startup.
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Complete values configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuesConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Named requests (key: value name).
    #[serde(default)]
    pub values: IndexMap<String, ValueRequest>,
}

impl ValuesConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [sources]
    /// disabled = ["environment.has_focus"]
    ///
    /// [values.page_url]
    /// source = "environment.current_url"
    ///
    /// [values.email]
    /// source = ["document.value", "global"]
    /// parameters = "#email"
    /// default_value = ""
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SourcePaths;
    use crate::value::Value;

    #[test]
    fn test_parse_empty_config() {
        let config = ValuesConfig::parse("").unwrap();
        assert!(config.sources.disabled.is_empty());
        assert!(config.values.is_empty());
    }

    #[test]
    fn test_parse_values() {
        let config = ValuesConfig::parse(
            r##"
[sources]
disabled = ["environment.has_focus"]

[values.page_url]
source = "environment.current_url"

[values.email]
source = ["document.value", "direct"]
parameters = "#email"
default_value = ""
"##,
        )
        .unwrap();
        assert_eq!(config.sources.disabled, vec!["environment.has_focus".to_string()]);
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["page_url", "email"]);

        let email = &config.values["email"];
        assert_eq!(email.source, SourcePaths::from(["document.value", "direct"]));
        assert_eq!(email.parameters, vec![Value::from("#email")]);
        assert_eq!(email.default_value, Value::from(""));
        assert_eq!(config.values["page_url"].default_value, Value::Null);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ValuesConfig::parse("[values.x]\nsource = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
