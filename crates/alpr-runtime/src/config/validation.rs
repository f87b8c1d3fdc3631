//! Configuration validation.

use super::error::{ConfigError, ConfigResult};
use super::schema::{AlprConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AlprConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File {
        match &logging.file_path {
            None => return Err(ConfigError::missing_field("logging.file_path")),
            Some(path) if path.file_name().is_none() => {
                return Err(ConfigError::validation(format!(
                    "Log file path has no file name: {}",
                    path.display()
                )));
            }
            Some(_) => {}
        }
    }

    if logging.max_files == 0 {
        return Err(ConfigError::validation(
            "logging.max_files must be at least 1",
        ));
    }

    for module in logging.filters.keys() {
        if module.trim().is_empty() {
            return Err(ConfigError::validation("Log filter module name is empty"));
        }
        if module.contains(['=', ',', ' ']) {
            return Err(ConfigError::validation(format!(
                "Invalid log filter module name: {module:?}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::schema::LogLevel;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&AlprConfig::default()).is_ok());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = AlprConfig::default();
        config.logging.output = LogOutput::File;

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::MissingField { field }) if field == "logging.file_path"));

        config.logging.file_path = Some(PathBuf::from("/tmp/alpr.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_file_path_needs_file_name() {
        let mut config = AlprConfig::default();
        config.logging.output = LogOutput::File;
        config.logging.file_path = Some(PathBuf::from("/"));

        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_zero_max_files() {
        let mut config = AlprConfig::default();
        config.logging.max_files = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_filter_names() {
        let mut config = AlprConfig::default();
        config
            .logging
            .filters
            .insert("alpr_framework".into(), LogLevel::Trace);
        assert!(validate_config(&config).is_ok());

        config.logging.filters.insert("bad=name".into(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }
}
