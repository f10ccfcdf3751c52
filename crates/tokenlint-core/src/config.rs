//! Configuration types for tokenlint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::rules::{RuleSource, ValidationRules};

/// Top-level configuration, usually loaded from `tokenlint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for failure (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Global-level rule set, if declared.
    #[serde(default)]
    pub rules: Option<ValidationRules>,

    /// Global token documents, relative to the config file.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Project declarations keyed by project id.
    #[serde(default)]
    pub projects: HashMap<String, ProjectConfig>,

    /// Brand declarations keyed by brand id.
    #[serde(default)]
    pub brands: HashMap<String, BrandConfig>,
}

/// Per-project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project-level rule set, if declared.
    #[serde(default)]
    pub rules: Option<ValidationRules>,

    /// Project token documents, relative to the config file.
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

/// Per-brand configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandConfig {
    /// The project this brand belongs to.
    #[serde(default)]
    pub project: Option<String>,

    /// Brand-level rule set, if declared.
    #[serde(default)]
    pub rules: Option<ValidationRules>,

    /// Brand token documents, relative to the config file.
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

impl RuleSource for Config {
    fn brand_rules(&self, brand: &str) -> Option<ValidationRules> {
        self.brands.get(brand).and_then(|b| b.rules.clone())
    }

    fn project_rules(&self, project: &str) -> Option<ValidationRules> {
        self.projects.get(project).and_then(|p| p.rules.clone())
    }

    fn global_rules(&self) -> Option<ValidationRules> {
        self.rules.clone()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::resolve_rules;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.rules.is_none());
        assert!(config.brands.is_empty());
    }

    #[test]
    fn parse_scoped_rules_and_files() {
        let toml = r#"
fail_on = "warning"
files = ["tokens/global.tokens.json"]

[rules.naming]
max_segments = 4

[projects.web]
files = ["tokens/web.tokens.json"]

[projects.web.rules.types]
strict = false

[brands.acme]
project = "web"
files = ["tokens/acme.tokens.json"]

[brands.acme.rules.naming]
require_description = true
"#;

        let config = Config::parse(toml).expect("parse");
        assert_eq!(config.fail_on.as_deref(), Some("warning"));
        assert_eq!(config.files.len(), 1);
        assert_eq!(
            config.brands.get("acme").and_then(|b| b.project.as_deref()),
            Some("web")
        );

        // Cascade through the config as a RuleSource.
        let brand_rules = resolve_rules(&config, Some("web"), Some("acme"));
        assert!(brand_rules.naming.require_description);
        // Whole-set semantics: the brand set's unspecified fields come
        // from built-in defaults, not from the project level.
        assert!(brand_rules.types.strict);

        let project_rules = resolve_rules(&config, Some("web"), Some("unknown-brand"));
        assert!(!project_rules.types.strict);

        let global = resolve_rules(&config, None, None);
        assert_eq!(global.naming.max_segments, Some(4));
    }

    #[test]
    fn parse_rejects_bad_toml() {
        assert!(matches!(
            Config::parse("fail_on = ["),
            Err(ConfigError::Parse { .. })
        ));
    }
}
