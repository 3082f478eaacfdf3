// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Ritmo configuration system.

use ritmo_config::diagnostic::ConfigError;
use ritmo_config::model::RitmoConfig;
use ritmo_config::{load_and_validate_str, load_config, load_config_from_str};
use serial_test::serial;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_ritmo_config() {
    let toml = r#"
[operator]
name = "Ana"
locale = "es"

[gateway]
base_url = "https://ops.example.com"
timeout_secs = 10

[datastore]
base_url = "https://store.example.com"
api_key = "service-key"
timeout_secs = 15

[prefs]
database_path = "/tmp/ritmo-test.db"
wal_mode = false

[settings_cache]
ttl_secs = 120

[log]
level = "debug"
format = "json"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.operator.name, "Ana");
    assert_eq!(config.operator.locale, "es");
    assert_eq!(config.gateway.base_url, "https://ops.example.com");
    assert_eq!(config.gateway.timeout_secs, 10);
    assert_eq!(config.datastore.base_url, "https://store.example.com");
    assert_eq!(config.datastore.api_key.as_deref(), Some("service-key"));
    assert_eq!(config.datastore.timeout_secs, 15);
    assert_eq!(config.prefs.database_path, "/tmp/ritmo-test.db");
    assert!(!config.prefs.wal_mode);
    assert_eq!(config.settings_cache.ttl_secs, 120);
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.format, "json");
}

/// Unknown field in [gateway] section produces an UnknownField error.
#[test]
fn unknown_field_in_gateway_produces_error() {
    let toml = r#"
[gateway]
base_ur = "http://localhost:8000"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ur"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.operator.name, "Director");
    assert_eq!(config.operator.locale, "es");
    assert_eq!(config.gateway.base_url, "http://localhost:8000");
    assert_eq!(config.gateway.timeout_secs, 30);
    assert_eq!(config.datastore.base_url, "http://localhost:54321");
    assert!(config.datastore.api_key.is_none());
    assert!(config.prefs.wal_mode);
    assert!(config.prefs.database_path.ends_with("ritmo.db"));
    assert_eq!(config.settings_cache.ttl_secs, 900);
    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.format, "compact");
}

/// Dot-notation overrides merge over TOML values (the shape env vars take
/// after the `RITMO_` map).
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[gateway]
base_url = "http://from-toml:8000"
"#;

    let config: RitmoConfig = Figment::new()
        .merge(Serialized::defaults(RitmoConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("gateway.base_url", "http://from-env:9000"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.gateway.base_url, "http://from-env:9000");
}

/// `RITMO_DATASTORE_API_KEY` must land on `datastore.api_key`, not
/// `datastore.api.key`.
#[test]
fn underscore_keys_survive_section_mapping() {
    use figment::{Figment, providers::Serialized};

    let config: RitmoConfig = Figment::new()
        .merge(Serialized::defaults(RitmoConfig::default()))
        .merge(("datastore.api_key", "key-from-env"))
        .extract()
        .expect("should set api_key via dot notation");

    assert_eq!(config.datastore.api_key.as_deref(), Some("key-from-env"));
}

/// A real environment variable overrides the compiled default.
#[test]
#[serial]
fn env_var_overrides_operator_name() {
    // set_var is unsafe in edition 2024; #[serial] keeps other env-touching
    // tests out of this window.
    unsafe { std::env::set_var("RITMO_OPERATOR_NAME", "EnvOp") };
    let config = load_config().expect("load with env override");
    unsafe { std::env::remove_var("RITMO_OPERATOR_NAME") };

    assert_eq!(config.operator.name, "EnvOp");
}

/// The provider sees env keys in their original uppercase; the section map
/// must still route `RITMO_GATEWAY_BASE_URL` onto `gateway.base_url`.
#[test]
#[serial]
fn uppercase_env_keys_map_into_their_section() {
    unsafe { std::env::set_var("RITMO_GATEWAY_BASE_URL", "http://from-env:9000") };
    let config = load_config().expect("load with env override");
    unsafe { std::env::remove_var("RITMO_GATEWAY_BASE_URL") };

    assert_eq!(config.gateway.base_url, "http://from-env:9000");
}

/// An unknown key comes back as a diagnostic carrying a did-you-mean.
#[test]
fn unknown_key_diagnostic_carries_suggestion() {
    let toml = r#"
[datastore]
api_ky = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce diagnostics");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "api_ky" && suggestion.as_deref() == Some("api_key")
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Structurally valid TOML can still fail semantic validation.
#[test]
fn semantic_validation_runs_after_deserialization() {
    let toml = r#"
[gateway]
timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))
    ));
}
