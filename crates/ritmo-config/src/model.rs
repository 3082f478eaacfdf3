// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Ritmo console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Ritmo configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RitmoConfig {
    /// Operator identity used for decisions and prompts.
    #[serde(default)]
    pub operator: OperatorConfig,

    /// REST gateway in front of the ops backend.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Hosted relational store reached over HTTP.
    #[serde(default)]
    pub datastore: DatastoreConfig,

    /// Local preferences database.
    #[serde(default)]
    pub prefs: PrefsConfig,

    /// Cached org settings fetched from the gateway.
    #[serde(default)]
    pub settings_cache: SettingsCacheConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Operator identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
    /// Name recorded as `decided_by` on approval decisions.
    #[serde(default = "default_operator_name")]
    pub name: String,

    /// Locale for rendered labels. Only `es` ships today.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            name: default_operator_name(),
            locale: default_locale(),
        }
    }
}

fn default_operator_name() -> String {
    "Director".to_string()
}

fn default_locale() -> String {
    "es".to_string()
}

/// REST gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the gateway, without the `/api` suffix.
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gateway_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Hosted relational store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatastoreConfig {
    /// Base URL of the store's REST surface.
    #[serde(default = "default_datastore_base_url")]
    pub base_url: String,

    /// API key sent as both `apikey` and bearer token. `None` requires the
    /// environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_datastore_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_datastore_base_url() -> String {
    "http://localhost:54321".to_string()
}

/// Local preferences database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrefsConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("ritmo").join("ritmo.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("ritmo.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Settings-cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsCacheConfig {
    /// How long a cached settings payload stays fresh, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SettingsCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    900
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
