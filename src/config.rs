//! TOML-based batch run configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Batch run configuration parsed from TOML.
///
/// Lists the instance files to process plus run-wide settings. Load from
/// TOML with [`RunConfig::from_toml_file`], or build one in code (the CLI
/// does this when instances are given directly).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Instance files, processed in order. Each produces `<path>.out`.
    pub instances: Vec<PathBuf>,
    /// Master random seed for the displacement victim pick.
    pub seed: u64,
    /// Optional CSV summary of all consumptions across the batch.
    pub summary_csv: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            seed: 42,
            summary_csv: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"instances"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl RunConfig {
    /// Parses a run configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a run configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.instances.is_empty() {
            errors.push(ConfigError {
                field: "instances".into(),
                message: "at least one instance file is required".into(),
            });
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
instances = ["data/level5_1.in", "data/level5_2.in"]
seed = 7
summary_csv = "summary.csv"
"#;
        let cfg = RunConfig::from_toml_str(toml).expect("valid TOML should parse");
        assert_eq!(cfg.instances.len(), 2);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.summary_csv.as_deref(), Some(Path::new("summary.csv")));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = RunConfig::from_toml_str("instances = [\"a.in\"]").expect("parses");
        assert_eq!(cfg.seed, 42);
        assert!(cfg.summary_csv.is_none());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = RunConfig::from_toml_str("bogus_field = true");
        assert!(result.is_err());
    }

    #[test]
    fn empty_instance_list_fails_validation() {
        let cfg = RunConfig::default();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "instances"));
    }
}
