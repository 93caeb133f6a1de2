// cli/src/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::DiagnosisCatalog;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "patientor.yaml";

/// Environment variable that can point at a config file.
pub const CONFIG_ENV_VAR: &str = "PATIENTOR_CONFIG";

/// How JSON results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON diagnosis list replacing the built-in catalog.
    pub diagnoses_path: Option<PathBuf>,
    /// Reject entries whose diagnosis codes are not in the catalog.
    pub strict_diagnosis_codes: bool,
    pub output: OutputFormat,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            diagnoses_path: None,
            strict_diagnosis_codes: false,
            output: OutputFormat::Pretty,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    pub fn catalog(&self) -> Result<DiagnosisCatalog> {
        match &self.diagnoses_path {
            Some(path) => DiagnosisCatalog::load(path)
                .with_context(|| format!("Failed to load diagnoses from {}", path.display())),
            None => DiagnosisCatalog::builtin().context("Failed to load the built-in diagnoses"),
        }
    }
}

/// The config file to read: the explicit path, else `patientor.yaml` in the
/// working directory when it exists.
pub fn resolve_config_path(config_file_path: Option<&Path>) -> Option<PathBuf> {
    match config_file_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            default_path.is_file().then_some(default_path)
        }
    }
}

/// Loads the CLI configuration.
///
/// An explicit path must exist. Without one, `patientor.yaml` in the working
/// directory is used if present, and the defaults otherwise.
pub fn load_cli_config(config_file_path: Option<&Path>) -> Result<CliConfig> {
    match resolve_config_path(config_file_path) {
        Some(path) => read_cli_config(&path),
        None => Ok(CliConfig::default()),
    }
}

fn read_cli_config(path: &Path) -> Result<CliConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_cli_config(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn parse_cli_config(content: &str) -> Result<CliConfig> {
    if content.trim().is_empty() {
        return Ok(CliConfig::default());
    }
    serde_yaml2::from_str(content).map_err(|e| anyhow::anyhow!("Invalid YAML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn should_parse_full_config() {
        let config = parse_cli_config(
            "diagnoses_path: /etc/patientor/diagnoses.json\nstrict_diagnosis_codes: true\noutput: compact\nlog_filter: debug\n",
        )
        .unwrap();

        assert_eq!(config.diagnoses_path, Some(PathBuf::from("/etc/patientor/diagnoses.json")));
        assert!(config.strict_diagnosis_codes);
        assert_eq!(config.output, OutputFormat::Compact);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config = parse_cli_config("strict_diagnosis_codes: true\n").unwrap();
        assert!(config.strict_diagnosis_codes);
        assert_eq!(config.output, OutputFormat::Pretty);
        assert_eq!(config.log_filter, "warn");
        assert!(config.diagnoses_path.is_none());
    }

    #[test]
    fn should_treat_empty_file_as_defaults() {
        assert_eq!(parse_cli_config("  \n").unwrap(), CliConfig::default());
    }

    #[test]
    fn should_reject_unknown_output_format() {
        assert!(parse_cli_config("output: xml\n").is_err());
    }

    #[test]
    fn should_keep_explicit_config_path() {
        let path = Path::new("/etc/patientor/custom.yaml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn should_fail_on_missing_explicit_file() {
        let err = load_cli_config(Some(Path::new("/nonexistent/patientor.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn should_load_config_and_custom_catalog() {
        let mut catalog_file = NamedTempFile::new().unwrap();
        write!(catalog_file, r#"[{{"code":"L20","name":"Atopic dermatitis"}}]"#).unwrap();

        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(config_file, "diagnoses_path: {}", catalog_file.path().display()).unwrap();

        let config = load_cli_config(Some(config_file.path())).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("L20"));
    }

    #[test]
    fn should_use_builtin_catalog_by_default() {
        let catalog = CliConfig::default().catalog().unwrap();
        assert_eq!(catalog.len(), 15);
    }
}
