// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: URL shapes, non-empty paths, sane timeouts.

use crate::diagnostic::ConfigError;
use crate::model::RitmoConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RitmoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    check_base_url("gateway.base_url", &config.gateway.base_url, &mut errors);
    check_base_url("datastore.base_url", &config.datastore.base_url, &mut errors);

    if config.gateway.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.datastore.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "datastore.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.prefs.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "prefs.database_path must not be empty".to_string(),
        });
    }

    if config.operator.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "operator.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !LOG_FORMATS.contains(&config.log.format.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.format `{}` is not one of {}",
                config.log.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_base_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{key} must not be empty"),
        });
        return;
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("{key} `{trimmed}` must start with http:// or https://"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RitmoConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_gateway_url_fails_validation() {
        let mut config = RitmoConfig::default();
        config.gateway.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("gateway.base_url"))
        ));
    }

    #[test]
    fn non_http_datastore_url_fails_validation() {
        let mut config = RitmoConfig::default();
        config.datastore.base_url = "postgres://db".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("datastore.base_url"))
        ));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = RitmoConfig::default();
        config.gateway.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))
        ));
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = RitmoConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log.level"))
        ));
    }

    #[test]
    fn all_errors_collected_not_just_first() {
        let mut config = RitmoConfig::default();
        config.gateway.base_url = "".to_string();
        config.operator.name = " ".to_string();
        config.log.format = "yaml".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = RitmoConfig::default();
        config.gateway.base_url = "https://ops.example.com".to_string();
        config.datastore.base_url = "https://store.example.com".to_string();
        config.datastore.api_key = Some("service-key".to_string());
        config.operator.name = "Ana".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
