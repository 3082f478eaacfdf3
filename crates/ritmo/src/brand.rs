// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo brand` command implementation.
//!
//! Brand DNA operations for one client. Generation is asynchronous on the
//! backend: `generate` starts it and records the request token, `refresh`
//! polls for the artifact and settles the lifecycle track with that token.
//! `validate` and `approve` call the backend first and record the
//! transition after it accepts; `reject` is a purely local verdict.

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Subcommand;
use ritmo_config::model::RitmoConfig;
use ritmo_core::{BrandDna, ClientId, RitmoError, Track};
use ritmo_datastore::{RemoteStateStore, StoreClient};
use ritmo_gateway::GatewayClient;
use ritmo_lifecycle::{StatusTracker, TrackEvent};

use crate::generation::{self, RefreshOutcome};

/// Actions under `ritmo brand`.
#[derive(Subcommand, Debug)]
pub enum BrandAction {
    /// Artifact, lifecycle state and recent history.
    Show { id: String },
    /// Start a generation on the backend.
    Generate { id: String },
    /// Poll a pending generation and settle it.
    Refresh { id: String },
    /// Ask the backend to score the artifact.
    Validate { id: String },
    /// Approve the artifact. Terminal: no further transitions.
    Approve { id: String },
    /// Send the artifact back for regeneration.
    Reject { id: String },
}

pub async fn run_brand(
    config: &RitmoConfig,
    action: BrandAction,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let gateway = GatewayClient::new(&config.gateway)?;
    let store = StoreClient::new(&config.datastore)?;
    let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store)));

    match action {
        BrandAction::Show { id } => run_show(&gateway, &tracker, id, json, use_color).await,
        BrandAction::Generate { id } => run_generate(&gateway, &tracker, id, json, use_color).await,
        BrandAction::Refresh { id } => run_refresh(&gateway, &tracker, id, json, use_color).await,
        BrandAction::Validate { id } => run_validate(&gateway, &tracker, id, json, use_color).await,
        BrandAction::Approve { id } => run_approve(&gateway, &tracker, id, json, use_color).await,
        BrandAction::Reject { id } => run_reject(&tracker, id, json, use_color).await,
    }
}

async fn run_show(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);

    let (artifact, state, history) = tokio::join!(
        gateway.brand_dna(&id),
        tracker.get_status(&id),
        tracker.history(&id),
    );
    let state = state?;

    let mut warnings = Vec::new();
    let artifact = match artifact {
        Ok(artifact) => artifact,
        Err(e) => {
            warnings.push(format!("artefacto no disponible: {e}"));
            None
        }
    };
    let history = match history {
        Ok(history) => history,
        Err(e) => {
            warnings.push(format!("historial no disponible: {e}"));
            Vec::new()
        }
    };

    if json {
        let payload = serde_json::json!({
            "artifact": artifact,
            "state": state,
            "history": history,
            "warnings": warnings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  Brand DNA - {}", id.0);
    println!("  {}", "-".repeat(50));
    match &artifact {
        Some(dna) => print_artifact(dna),
        None => println!("    (sin artefacto)"),
    }

    println!();
    println!("    Estado: {}", state.brand_dna_state);
    if let Some(request) = &state.brand_dna_request {
        println!("    Request pendiente: {}", request.0);
    }

    if !history.is_empty() {
        println!();
        println!("  Historial reciente");
        let start = history.len().saturating_sub(5);
        for record in &history[start..] {
            println!(
                "    {}  {:<16} {} -> {} ({})",
                record.recorded_at.format("%Y-%m-%d %H:%M"),
                record.track,
                record.from,
                record.to,
                record.event
            );
        }
    }

    print_warnings(&warnings, use_color);
    println!();
    Ok(())
}

fn print_artifact(dna: &BrandDna) {
    println!("    Esencia:         {}", dna.essence);
    println!("    Tono:            {}", dna.tone);
    println!("    Posicionamiento: {}", dna.positioning);
    println!("    Audiencia:       {}", dna.target_audience);
    println!("    Estilo visual:   {}", dna.visual_style);
    println!("    Narrativa:       {}", dna.narrative);
    println!("    Diferenciación:  {}", dna.differentiation);
    println!("    Calidad:         {}", dna.quality_score);
    println!("    Aprobado:        {}", if dna.approved { "sí" } else { "no" });
    println!("    Hash:            {}", dna.content_hash);
}

async fn run_generate(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let started = gateway.generate_brand_dna(&id).await?;
    let state = tracker
        .begin_generation(&id, Track::BrandDna, started.request_id.clone())
        .await?;

    if json {
        let payload = serde_json::json!({
            "request_id": started.request_id,
            "state": state,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!(
            "  {} Generación iniciada (request {})",
            "✓".green(),
            started.request_id.0
        );
    } else {
        println!("  [OK] Generación iniciada (request {})", started.request_id.0);
    }
    println!("    Estado: {}", state.brand_dna_state);
    println!("    Usa `ritmo brand refresh {}` para comprobar el resultado.", id.0);
    Ok(())
}

async fn run_refresh(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let outcome = poll_generation(gateway, tracker, &id).await?;

    if json {
        let payload = match &outcome {
            RefreshOutcome::Confirmed(state) => {
                serde_json::json!({ "result": "confirmed", "state": state })
            }
            RefreshOutcome::Failed(state) => {
                serde_json::json!({ "result": "failed", "state": state })
            }
            RefreshOutcome::StillRunning => serde_json::json!({ "result": "still_running" }),
            RefreshOutcome::AlreadySettled(state) => {
                serde_json::json!({ "result": "already_settled", "state": state })
            }
            RefreshOutcome::NothingPending(state) => {
                serde_json::json!({ "result": "nothing_pending", "state": state })
            }
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    match outcome {
        RefreshOutcome::Confirmed(state) => {
            if use_color {
                use colored::Colorize;
                println!(
                    "  {} Generación completada (estado {})",
                    "✓".green(),
                    state.brand_dna_state
                );
            } else {
                println!("  [OK] Generación completada (estado {})", state.brand_dna_state);
            }
        }
        RefreshOutcome::Failed(state) => {
            if use_color {
                use colored::Colorize;
                println!(
                    "  {} La generación falló (estado {})",
                    "✗".red(),
                    state.brand_dna_state
                );
            } else {
                println!("  [FAIL] La generación falló (estado {})", state.brand_dna_state);
            }
        }
        RefreshOutcome::StillRunning => println!("  Generación aún en curso."),
        RefreshOutcome::AlreadySettled(state) => {
            println!("  El artefacto ya está registrado (estado {}).", state.brand_dna_state);
        }
        RefreshOutcome::NothingPending(state) => {
            println!(
                "  No hay generación pendiente (estado {}). Usa `ritmo brand generate`.",
                state.brand_dna_state
            );
        }
    }
    Ok(())
}

async fn poll_generation(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: &ClientId,
) -> Result<RefreshOutcome, RitmoError> {
    let artifact = gateway.brand_dna(id).await.map(|dna| dna.is_some());
    generation::settle(tracker, id, Track::BrandDna, artifact).await
}

async fn run_validate(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let report = gateway.validate_brand_dna(&id).await?;
    let state = tracker.apply(&id, Track::BrandDna, TrackEvent::Validate).await?;

    if json {
        let payload = serde_json::json!({
            "quality_score": report.quality_score,
            "issues": report.issues,
            "state": state,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!("  {} Validación completada (calidad {})", "✓".green(), report.quality_score);
    } else {
        println!("  [OK] Validación completada (calidad {})", report.quality_score);
    }
    if report.issues.is_empty() {
        println!("    Sin problemas detectados.");
    }
    for issue in &report.issues {
        if use_color {
            use colored::Colorize;
            println!("    {} {issue}", "!".yellow());
        } else {
            println!("    [WARN] {issue}");
        }
    }
    println!("    Estado: {}", state.brand_dna_state);
    Ok(())
}

async fn run_approve(
    gateway: &GatewayClient,
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let dna = gateway.approve_brand_dna(&id).await?;
    let state = tracker.apply(&id, Track::BrandDna, TrackEvent::Approve).await?;

    if json {
        let payload = serde_json::json!({ "artifact": dna, "state": state });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!("  {} Brand DNA aprobado (calidad {})", "✓".green(), dna.quality_score);
    } else {
        println!("  [OK] Brand DNA aprobado (calidad {})", dna.quality_score);
    }
    println!("    Estado: {}", state.brand_dna_state);
    Ok(())
}

async fn run_reject(
    tracker: &StatusTracker,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let state = tracker.apply(&id, Track::BrandDna, TrackEvent::Reject).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!("  {} Brand DNA rechazado, listo para regenerar", "✗".red());
    } else {
        println!("  [FAIL] Brand DNA rechazado, listo para regenerar");
    }
    println!("    Estado: {}", state.brand_dna_state);
    Ok(())
}

fn print_warnings(warnings: &[String], use_color: bool) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings {
        if use_color {
            use colored::Colorize;
            println!("  {} {}", "!".yellow(), warning.yellow());
        } else {
            println!("  [WARN] {warning}");
        }
    }
}

#[cfg(test)]
mod tests {
    use ritmo_config::model::{DatastoreConfig, GatewayConfig};
    use ritmo_core::TrackState;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn pending_state_row() -> serde_json::Value {
        serde_json::json!({
            "client_id": "cl-1",
            "brand_dna_state": "in_progress",
            "brand_dna_request": "req-1",
            "content_calendar_state": "not_started",
            "content_calendar_request": null,
            "campaigns_state": "inactive",
            "version": 1,
            "last_updated": "2026-03-01T12:00:00Z",
        })
    }

    fn settled_state_row(state: &str) -> serde_json::Value {
        serde_json::json!({
            "client_id": "cl-1",
            "brand_dna_state": state,
            "brand_dna_request": null,
            "content_calendar_state": "not_started",
            "content_calendar_request": null,
            "campaigns_state": "inactive",
            "version": 2,
            "last_updated": "2026-03-01T12:05:00Z",
        })
    }

    fn event_row(event: &str, to: &str) -> serde_json::Value {
        serde_json::json!({
            "client_id": "cl-1",
            "track": "brand_dna",
            "from": "in_progress",
            "event": event,
            "to": to,
            "request_id": "req-1",
            "recorded_at": "2026-03-01T12:05:00Z",
        })
    }

    fn stack(
        gateway_server: &MockServer,
        store_server: &MockServer,
    ) -> (GatewayClient, StatusTracker) {
        let gateway = GatewayClient::new(&GatewayConfig {
            base_url: gateway_server.uri(),
            timeout_secs: 5,
        })
        .unwrap();
        let store = StoreClient::new(&DatastoreConfig {
            base_url: store_server.uri(),
            api_key: None,
            timeout_secs: 5,
        })
        .unwrap();
        let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store)));
        (gateway, tracker)
    }

    #[tokio::test]
    async fn refresh_confirms_when_the_artifact_landed() {
        let gateway_server = MockServer::start().await;
        let store_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/brand-dna/cl-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ritmo_test_utils::fixtures::brand_dna("cl-1")),
            )
            .mount(&gateway_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/client_state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([pending_state_row()])),
            )
            .mount(&store_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/client_state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([settled_state_row("generated")])),
            )
            .mount(&store_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/client_state_events"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!([event_row("content_ready", "generated")])),
            )
            .mount(&store_server)
            .await;

        let (gateway, tracker) = stack(&gateway_server, &store_server);
        let outcome = poll_generation(&gateway, &tracker, &ClientId("cl-1".into()))
            .await
            .unwrap();
        match outcome {
            RefreshOutcome::Confirmed(state) => {
                assert_eq!(state.brand_dna_state, TrackState::Generated);
                assert!(state.brand_dna_request.is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_fails_the_track_on_backend_rejection() {
        let gateway_server = MockServer::start().await;
        let store_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/brand-dna/cl-1"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "detail": "generation failed",
            })))
            .mount(&gateway_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/client_state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([pending_state_row()])),
            )
            .mount(&store_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/client_state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([settled_state_row("failed")])),
            )
            .mount(&store_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/client_state_events"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!([event_row("fail", "failed")])),
            )
            .mount(&store_server)
            .await;

        let (gateway, tracker) = stack(&gateway_server, &store_server);
        let outcome = poll_generation(&gateway, &tracker, &ClientId("cl-1".into()))
            .await
            .unwrap();
        match outcome {
            RefreshOutcome::Failed(state) => {
                assert_eq!(state.brand_dna_state, TrackState::Failed);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_reports_a_generation_still_running() {
        let gateway_server = MockServer::start().await;
        let store_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/brand-dna/cl-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&gateway_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/client_state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([pending_state_row()])),
            )
            .mount(&store_server)
            .await;

        let (gateway, tracker) = stack(&gateway_server, &store_server);
        let outcome = poll_generation(&gateway, &tracker, &ClientId("cl-1".into()))
            .await
            .unwrap();
        assert_eq!(outcome, RefreshOutcome::StillRunning);
    }
}
