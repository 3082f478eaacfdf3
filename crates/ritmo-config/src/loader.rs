// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./ritmo.toml` > `~/.config/ritmo/ritmo.toml` >
//! `/etc/ritmo/ritmo.toml` with environment variable overrides via the
//! `RITMO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RitmoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ritmo/ritmo.toml` (system-wide)
/// 3. `~/.config/ritmo/ritmo.toml` (user XDG config)
/// 4. `./ritmo.toml` (local directory)
/// 5. `RITMO_*` environment variables
pub fn load_config() -> Result<RitmoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RitmoConfig::default()))
        .merge(Toml::file("/etc/ritmo/ritmo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("ritmo/ritmo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("ritmo.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RitmoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RitmoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RitmoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RitmoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscores
/// inside key names survive: `RITMO_GATEWAY_BASE_URL` must map to
/// `gateway.base_url`, not `gateway.base.url`.
fn env_provider() -> Env {
    Env::prefixed("RITMO_").map(|key| {
        // The key arrives with the prefix stripped but still in the env
        // var's original case, so lowercase before matching the sections.
        // Example: RITMO_DATASTORE_API_KEY -> "datastore_api_key"
        let key_str = key.as_str().to_lowercase();
        let mapped = key_str
            .replacen("settings_cache_", "settings_cache.", 1)
            .replacen("operator_", "operator.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("datastore_", "datastore.", 1)
            .replacen("prefs_", "prefs.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
