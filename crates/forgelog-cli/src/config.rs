//! Configuration for the `forgelog` binary.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file (`--config <path>` or `FORGELOG_CONFIG`)
//! 3. Environment variables (`FORGELOG_DEBUG`, `FORGELOG_LOG_LEVEL`,
//!    `FORGELOG_FORMAT`)
//! 4. Command-line flags
//!
//! Example file:
//!
//! ```yaml
//! debug: false
//! log_level: info
//! format: table
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming a YAML config file.
pub const CONFIG_PATH_VAR: &str = "FORGELOG_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment variable held an unusable value.
    #[error("invalid {name}: {value:?}")]
    InvalidEnv {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// How the final report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two box-drawn text tables.
    #[default]
    Table,
    /// The full game state as pretty-printed JSON.
    Json,
}

impl core::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Complete tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgelogConfig {
    /// Trace every applied event at `debug` level.
    #[serde(default)]
    pub debug: bool,

    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ForgelogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: default_log_level(),
            format: OutputFormat::Table,
        }
    }
}

impl ForgelogConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Empty input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load defaults, then the optional file, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file or an environment value is bad.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let env_file = std::env::var(CONFIG_PATH_VAR).ok();
        let mut config = file
            .or_else(|| env_file.as_deref().map(Path::new))
            .map_or_else(|| Ok(Self::default()), Self::from_file)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` returns the value of a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for values that do not parse.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("FORGELOG_DEBUG") {
            self.debug = parse_flag(&value).ok_or(ConfigError::InvalidEnv {
                name: "FORGELOG_DEBUG",
                value,
            })?;
        }
        if let Some(value) = lookup("FORGELOG_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("FORGELOG_FORMAT") {
            let Ok(format) = value.parse() else {
                return Err(ConfigError::InvalidEnv {
                    name: "FORGELOG_FORMAT",
                    value,
                });
            };
            self.format = format;
        }
        Ok(())
    }

    /// The log filter to use when `RUST_LOG` is not set.
    pub fn effective_log_level(&self) -> &str {
        if self.debug { "debug" } else { &self.log_level }
    }
}

/// Accept the usual spellings of a boolean toggle.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_is_info_tables() {
        let config = ForgelogConfig::default();
        assert!(!config.debug);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = "debug: true\nlog_level: trace\nformat: json\n";
        let config = ForgelogConfig::parse(yaml).unwrap_or_default();
        assert!(config.debug);
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn parse_partial_and_empty_yaml() {
        let config = ForgelogConfig::parse("format: json\n").unwrap_or_default();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "info");

        assert!(matches!(ForgelogConfig::parse(""), Ok(ref c) if *c == ForgelogConfig::default()));
    }

    #[test]
    fn unknown_format_in_yaml_is_rejected() {
        assert!(matches!(
            ForgelogConfig::parse("format: csv\n"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut config = ForgelogConfig::parse("format: json\n").unwrap_or_default();
        let result = config.apply_env_overrides(env(&[
            ("FORGELOG_FORMAT", "table"),
            ("FORGELOG_DEBUG", "yes"),
        ]));
        assert!(result.is_ok());
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.debug);
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn bad_env_values_are_errors() {
        let mut config = ForgelogConfig::default();
        assert!(matches!(
            config.apply_env_overrides(env(&[("FORGELOG_DEBUG", "maybe")])),
            Err(ConfigError::InvalidEnv { name: "FORGELOG_DEBUG", .. })
        ));
        assert!(matches!(
            config.apply_env_overrides(env(&[("FORGELOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidEnv { name: "FORGELOG_FORMAT", .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ForgelogConfig::from_file(Path::new("/nonexistent/forgelog.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
