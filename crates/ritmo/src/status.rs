// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo status` command implementation.
//!
//! Probes the gateway health endpoint and the hosted store's REST surface
//! with short timeouts, so the command answers quickly even when both
//! backends are down.

use std::io::IsTerminal;
use std::time::Duration;

use ritmo_config::model::RitmoConfig;
use ritmo_core::RitmoError;
use ritmo_gateway::HealthResponse;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub gateway_running: bool,
    pub gateway_status: Option<String>,
    pub uptime_secs: Option<u64>,
    pub uptime_human: Option<String>,
    pub gateway_url: String,
    pub store_reachable: bool,
    pub store_url: String,
}

/// Format seconds into a human-readable duration string.
fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Run the `ritmo status` command.
///
/// Both probes run concurrently. If `--json` is passed, outputs structured
/// JSON for scripting. If `--plain` is passed or stdout is not a TTY,
/// disables colors.
pub async fn run_status(config: &RitmoConfig, json: bool, plain: bool) -> Result<(), RitmoError> {
    let gateway_url = format!("{}/api/health", config.gateway.base_url.trim_end_matches('/'));
    let store_url = format!("{}/rest/v1/", config.datastore.base_url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .map_err(|e| RitmoError::Internal(format!("failed to create HTTP client: {e}")))?;

    let (gateway_result, store_result) = tokio::join!(
        client.get(&gateway_url).send(),
        client.head(&store_url).send(),
    );

    let health: Option<HealthResponse> = match gateway_result {
        Ok(resp) if resp.status().is_success() => resp.json().await.ok(),
        _ => None,
    };
    // Any response at all means the store answered; auth problems are the
    // doctor's business.
    let store_reachable = store_result.is_ok();

    let response = StatusResponse {
        gateway_running: health.is_some(),
        gateway_status: health.as_ref().map(|h| h.status.clone()),
        uptime_secs: health.as_ref().and_then(|h| h.uptime_secs),
        uptime_human: health.as_ref().and_then(|h| h.uptime_secs).map(format_uptime),
        gateway_url,
        store_reachable,
        store_url,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&response, use_color);
    }

    Ok(())
}

fn print_status(response: &StatusResponse, use_color: bool) {
    println!();
    println!("  ritmo status");
    println!("  {}", "-".repeat(40));

    if response.gateway_running {
        let state = response.gateway_status.as_deref().unwrap_or("ok");
        let uptime = response
            .uptime_human
            .as_ref()
            .map(|u| format!(" (uptime: {u})"))
            .unwrap_or_default();
        if use_color {
            use colored::Colorize;
            println!("    Gateway:  {} {}{uptime}", "✓".green(), state.green());
        } else {
            println!("    Gateway:  [OK] {state}{uptime}");
        }
    } else if use_color {
        use colored::Colorize;
        println!("    Gateway:  {} {}", "✗".red(), "not running".red());
        println!("    Endpoint: {}", response.gateway_url);
    } else {
        println!("    Gateway:  [FAIL] not running");
        println!("    Endpoint: {}", response.gateway_url);
    }

    if response.store_reachable {
        if use_color {
            use colored::Colorize;
            println!("    Store:    {} {}", "✓".green(), "reachable".green());
        } else {
            println!("    Store:    [OK] reachable");
        }
    } else if use_color {
        use colored::Colorize;
        println!("    Store:    {} {}", "✗".red(), "unreachable".red());
        println!("    Endpoint: {}", response.store_url);
    } else {
        println!("    Store:    [FAIL] unreachable");
        println!("    Endpoint: {}", response.store_url);
    }

    if !response.gateway_running || !response.store_reachable {
        println!();
        println!("  Check gateway.base_url and datastore.base_url in ritmo.toml.");
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uptime_minutes() {
        assert_eq!(format_uptime(120), "2m");
    }

    #[test]
    fn format_uptime_hours() {
        assert_eq!(format_uptime(3720), "1h 2m");
    }

    #[test]
    fn format_uptime_days() {
        assert_eq!(format_uptime(90060), "1d 1h 1m");
    }

    #[test]
    fn status_response_serializes() {
        let resp = StatusResponse {
            gateway_running: true,
            gateway_status: Some("ok".to_string()),
            uptime_secs: Some(3600),
            uptime_human: Some("1h 0m".to_string()),
            gateway_url: "http://localhost:8000/api/health".to_string(),
            store_reachable: true,
            store_url: "http://localhost:54321/rest/v1/".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"gateway_running\":true"));
        assert!(json.contains("\"store_reachable\":true"));
    }

    #[test]
    fn status_response_offline_serializes() {
        let resp = StatusResponse {
            gateway_running: false,
            gateway_status: None,
            uptime_secs: None,
            uptime_human: None,
            gateway_url: "http://localhost:8000/api/health".to_string(),
            store_reachable: false,
            store_url: "http://localhost:54321/rest/v1/".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"gateway_running\":false"));
        assert!(json.contains("\"uptime_secs\":null"));
    }
}
