// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo dashboard` command implementation.
//!
//! One-screen portfolio overview: pre-aggregated counts, the client roster
//! and the pending approval queue. The three loads run concurrently and
//! settle independently, so a failing pane degrades to a warning line while
//! the others still render their data.

use std::collections::HashMap;
use std::io::IsTerminal;

use ritmo_config::model::RitmoConfig;
use ritmo_core::{Approval, ApprovalStatus, Client, RitmoError};
use ritmo_gateway::{DashboardSummary, GatewayClient};
use serde::Serialize;

/// Everything the dashboard renders. A pane is `None` when its load failed;
/// the failure text lives in `warnings`.
#[derive(Debug, Default, Serialize)]
pub struct DashboardData {
    pub summary: Option<DashboardSummary>,
    pub clients: Option<Vec<Client>>,
    pub pending_approvals: Option<Vec<Approval>>,
    pub warnings: Vec<String>,
}

/// Load the three panes concurrently. Failures never short-circuit the
/// other loads.
pub async fn load_dashboard(gateway: &GatewayClient) -> DashboardData {
    let (summary, clients, approvals) = tokio::join!(
        gateway.dashboard_summary(),
        gateway.list_clients(),
        gateway.approvals(Some(ApprovalStatus::Pending)),
    );

    let mut data = DashboardData::default();
    match summary {
        Ok(summary) => data.summary = Some(summary),
        Err(e) => data.warnings.push(format!("resumen no disponible: {e}")),
    }
    match clients {
        Ok(clients) => data.clients = Some(clients),
        Err(e) => data.warnings.push(format!("clientes no disponibles: {e}")),
    }
    match approvals {
        Ok(approvals) => data.pending_approvals = Some(approvals),
        Err(e) => data.warnings.push(format!("aprobaciones no disponibles: {e}")),
    }
    data
}

/// Run the `ritmo dashboard` command.
pub async fn run_dashboard(config: &RitmoConfig, json: bool, plain: bool) -> Result<(), RitmoError> {
    let gateway = GatewayClient::new(&config.gateway)?;
    let data = load_dashboard(&gateway).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  ritmo dashboard");
    println!("  {}", "-".repeat(50));

    if let Some(summary) = &data.summary {
        println!("    Clientes activos:   {:>4}", summary.active_clients);
        println!("    Campañas activas:   {:>4}", summary.active_campaigns);
        println!("    Posts este mes:     {:>4}", summary.posts_this_month);
        println!(
            "    Aprobaciones:       {:>4} pendientes ({} urgentes)",
            summary.pending_approvals, summary.urgent_approvals
        );
    }

    if let Some(clients) = &data.clients {
        println!();
        println!("  Clientes");
        println!("  {}", "-".repeat(50));
        if clients.is_empty() {
            println!("    (sin clientes)");
        }
        for client in clients {
            println!(
                "    {:<28} {:<10} {}",
                client.name, client.status, client.industry
            );
        }
    }

    if let Some(approvals) = &data.pending_approvals {
        let names: HashMap<&str, &str> = data
            .clients
            .iter()
            .flatten()
            .map(|c| (c.id.0.as_str(), c.name.as_str()))
            .collect();

        println!();
        println!("  Aprobaciones pendientes");
        println!("  {}", "-".repeat(50));
        if approvals.is_empty() {
            println!("    (cola vacía)");
        }
        for item in approvals {
            let client = names
                .get(item.client_id.0.as_str())
                .copied()
                .unwrap_or(item.client_id.0.as_str());
            println!(
                "    {:<4} {:<34} {:<20} {}",
                item.priority.to_string().to_uppercase(),
                item.summary.title(),
                client,
                item.bot
            );
        }
    }

    if !data.warnings.is_empty() {
        println!();
        for warning in &data.warnings {
            if use_color {
                use colored::Colorize;
                println!("  {} {}", "!".yellow(), warning.yellow());
            } else {
                println!("  [WARN] {warning}");
            }
        }
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use ritmo_config::model::GatewayConfig;
    use ritmo_core::Priority;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn gateway_for(server: &MockServer) -> GatewayClient {
        GatewayClient::new(&GatewayConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn all_three_panes_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "active_clients": 2,
                "active_campaigns": 1,
                "posts_this_month": 12,
                "pending_approvals": 3,
                "urgent_approvals": 1,
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clients": [ritmo_test_utils::fixtures::client("cl-1", "Acme Foods")],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/approvals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "approvals": [ritmo_test_utils::fixtures::approval("req-1", "cl-1", Priority::P1)],
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let data = load_dashboard(&gateway).await;

        assert_eq!(data.summary.unwrap().active_clients, 2);
        assert_eq!(data.clients.unwrap().len(), 1);
        assert_eq!(data.pending_approvals.unwrap().len(), 1);
        assert!(data.warnings.is_empty());
    }

    #[tokio::test]
    async fn one_failing_pane_leaves_the_others_rendered() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/summary"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "clients": [] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/approvals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "approvals": [] })),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let data = load_dashboard(&gateway).await;

        assert!(data.summary.is_none());
        assert!(data.clients.is_some());
        assert!(data.pending_approvals.is_some());
        assert_eq!(data.warnings.len(), 1);
        assert!(data.warnings[0].contains("resumen"));
    }
}
