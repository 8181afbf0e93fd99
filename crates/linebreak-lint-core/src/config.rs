//! Configuration types for linebreak-lint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for linebreak-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
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

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string(), "**/dist/**".to_string()],
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Deserializes an option into `T`.
    ///
    /// Returns `Ok(None)` when the option is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is present but has the wrong shape.
    pub fn parse_option<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.options
            .get(key)
            .map(|v| {
                v.clone().try_into().map_err(|e: toml::de::Error| ConfigError::Option {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option has the wrong shape.
    #[error("Invalid option `{key}`: {message}")]
    Option {
        /// Option key.
        key: String,
        /// Deserialization error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("linebreak-between-statements"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/generated/**"]

[rules.linebreak-between-statements]
enabled = true
severity = "warning"
statements = [["always", "*", "*"]]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert!(config.is_rule_enabled("linebreak-between-statements"));
        assert_eq!(
            config.rule_severity("linebreak-between-statements"),
            Some(crate::Severity::Warning)
        );

        let rule_config = config.rules.get("linebreak-between-statements").unwrap();
        let statements: Vec<Vec<String>> = rule_config.parse_option("statements").unwrap().unwrap();
        assert_eq!(statements, vec![vec!["always", "*", "*"]]);
    }

    #[test]
    fn disabled_rule_is_reported_disabled() {
        let config = Config::parse("[rules.linebreak-between-statements]\nenabled = false\n")
            .expect("Failed to parse");
        assert!(!config.is_rule_enabled("linebreak-between-statements"));
    }

    #[test]
    fn parse_option_absent_and_malformed() {
        let config = Config::parse("[rules.r]\nstatements = 3\n").expect("Failed to parse");
        let rule_config = config.rules.get("r").unwrap();

        let missing: Option<Vec<String>> = rule_config.parse_option("other").unwrap();
        assert!(missing.is_none());

        let err = rule_config
            .parse_option::<Vec<String>>("statements")
            .unwrap_err();
        assert!(err.to_string().contains("statements"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
