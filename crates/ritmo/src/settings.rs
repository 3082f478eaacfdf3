// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo settings` command implementation.
//!
//! `show` renders the operator identity, the saved UI preferences and the
//! specialists roster. The roster is served from the local cache while the
//! cached copy is inside its TTL; otherwise it is refetched and re-cached,
//! and a stale copy still covers for a dead gateway.

use std::collections::BTreeMap;
use std::io::IsTerminal;

use chrono::Utc;
use clap::Subcommand;
use ritmo_config::model::RitmoConfig;
use ritmo_core::{RitmoError, Specialist};
use ritmo_gateway::GatewayClient;
use ritmo_prefs::Database;
use ritmo_prefs::queries::{settings_cache, ui_prefs};
use tracing::debug;

/// Actions under `ritmo settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Operator identity, saved preferences and the specialists roster.
    Show,
    /// Save a preference value.
    Set { key: String, value: String },
}

/// Where the rendered roster came from.
#[derive(Debug)]
enum RosterSource {
    /// Fetched from the gateway just now (and cached).
    Fresh,
    /// Served from the cache; the stamp is when it was fetched.
    Cached(String),
    /// Gateway down and no usable cache.
    Unavailable(String),
}

pub async fn run_settings(
    config: &RitmoConfig,
    action: SettingsAction,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    match action {
        SettingsAction::Show => run_show(config, json, use_color).await,
        SettingsAction::Set { key, value } => run_set(config, key, value, json, use_color).await,
    }
}

async fn run_show(config: &RitmoConfig, json: bool, use_color: bool) -> Result<(), RitmoError> {
    let db = Database::open_with(&config.prefs).await?;
    let prefs = ui_prefs::all(&db).await?;

    let gateway = GatewayClient::new(&config.gateway)?;
    let (roster, source) = load_roster(&gateway, &db, config.settings_cache.ttl_secs).await;
    db.close().await?;

    if json {
        let prefs: BTreeMap<String, String> = prefs.into_iter().collect();
        let source_json = match &source {
            RosterSource::Fresh => serde_json::json!({ "kind": "fresh" }),
            RosterSource::Cached(stamp) => {
                serde_json::json!({ "kind": "cached", "fetched_at": stamp })
            }
            RosterSource::Unavailable(error) => {
                serde_json::json!({ "kind": "unavailable", "error": error })
            }
        };
        let payload = serde_json::json!({
            "operator": config.operator,
            "prefs": prefs,
            "specialists": roster,
            "roster_source": source_json,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  Operador");
    println!("    Nombre: {}", config.operator.name);
    println!("    Locale: {}", config.operator.locale);

    println!();
    println!("  Preferencias");
    if prefs.is_empty() {
        println!("    (sin preferencias guardadas)");
    }
    for (key, value) in &prefs {
        println!("    {key:<28} {value}");
    }

    println!();
    match &source {
        RosterSource::Fresh => println!("  Especialistas ({})", roster.len()),
        RosterSource::Cached(stamp) => {
            println!("  Especialistas ({}, caché del {stamp})", roster.len());
        }
        RosterSource::Unavailable(error) => {
            if use_color {
                use colored::Colorize;
                println!("  {} Especialistas no disponibles: {error}", "!".yellow());
            } else {
                println!("  [WARN] Especialistas no disponibles: {error}");
            }
        }
    }
    for specialist in &roster {
        println!(
            "    {:<24} {:<20} {}",
            specialist.name,
            specialist.role,
            specialist.status.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

async fn run_set(
    config: &RitmoConfig,
    key: String,
    value: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    if !ui_prefs::KNOWN_KEYS.contains(&key.as_str()) {
        return Err(RitmoError::Validation {
            field: "key".into(),
            message: format!(
                "unknown preference: {key} (known: {})",
                ui_prefs::KNOWN_KEYS.join(", ")
            ),
        });
    }

    let db = Database::open_with(&config.prefs).await?;
    ui_prefs::set(&db, &key, &value).await?;
    db.close().await?;

    if json {
        let payload = serde_json::json!({ "key": key, "value": value });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!("  {} {key} = {value}", "✓".green());
    } else {
        println!("  [OK] {key} = {value}");
    }
    Ok(())
}

/// Resolve the specialists roster: fresh cache first, then the gateway
/// (re-caching the result), and a stale cache as the fallback when the
/// gateway cannot be reached.
async fn load_roster(
    gateway: &GatewayClient,
    db: &Database,
    ttl_secs: u64,
) -> (Vec<Specialist>, RosterSource) {
    let cached = settings_cache::get(db, settings_cache::SPECIALISTS)
        .await
        .ok()
        .flatten();
    let stale = cached
        .as_ref()
        .map(|c| settings_cache::is_stale(&c.fetched_at, ttl_secs, Utc::now()))
        .unwrap_or(true);

    if !stale {
        if let Some(cached) = &cached {
            if let Some(roster) = roster_from_payload(&cached.payload) {
                return (roster, RosterSource::Cached(cached.fetched_at.clone()));
            }
        }
    }

    match gateway.specialists().await {
        Ok(roster) => {
            match serde_json::to_string(&roster) {
                Ok(payload) => {
                    if let Err(e) =
                        settings_cache::put(db, settings_cache::SPECIALISTS, &payload).await
                    {
                        debug!(error = %e, "failed to cache the specialists roster");
                    }
                }
                Err(e) => debug!(error = %e, "failed to serialize the specialists roster"),
            }
            (roster, RosterSource::Fresh)
        }
        Err(e) => {
            // A stale cache still beats nothing.
            if let Some(cached) = cached {
                if let Some(roster) = roster_from_payload(&cached.payload) {
                    return (roster, RosterSource::Cached(cached.fetched_at));
                }
            }
            (Vec::new(), RosterSource::Unavailable(e.to_string()))
        }
    }
}

fn roster_from_payload(payload: &str) -> Option<Vec<Specialist>> {
    serde_json::from_str(payload).ok()
}
