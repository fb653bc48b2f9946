//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GuardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `provider.api_token`.
pub const API_TOKEN_ENV: &str = "PATHGUARD_API_TOKEN";

/// File the CLI falls back to when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pathguard.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// `PATHGUARD_API_TOKEN`, when set and non-empty, replaces whatever token
/// the file carries.
pub fn load_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: GuardConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from an explicit path, from `pathguard.toml` when it exists, or
/// fall back to built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<GuardConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }
    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.exists() {
        return load_config(default);
    }
    let mut config = GuardConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut GuardConfig) {
    if let Ok(token) = std::env::var(API_TOKEN_ENV) {
        if !token.is_empty() {
            config.provider.api_token = token;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_parses_and_validates() {
        let file = write_config(
            r#"
            [provider]
            zone_id = "zone-1"

            [budget]
            hard_limit = 2048
            safety_margin = 128
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.provider.zone_id, "zone-1");
        assert_eq!(config.budget.effective(), 1920);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/pathguard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let file = write_config("[provider\nzone_id = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_problems_are_collected() {
        let file = write_config(
            r#"
            [budget]
            hard_limit = 100
            safety_margin = 100
            max_condense_passes = 0

            [rule]
            action = "detonate"
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_env_token_override() {
        let file = write_config(
            r#"
            [provider]
            zone_id = "zone-1"
            api_token = "from-file"
            "#,
        );
        std::env::set_var(API_TOKEN_ENV, "from-env");
        let config = load_config(file.path()).unwrap();
        std::env::remove_var(API_TOKEN_ENV);
        assert_eq!(config.provider.api_token, "from-env");
    }
}
