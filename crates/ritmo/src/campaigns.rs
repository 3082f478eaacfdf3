// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo campaigns` command implementation.
//!
//! Listing goes through the gateway. Creation plans locally and writes the
//! whole launch set to the store in one pass, guarded by the idempotency
//! key so a repeated submission returns the existing campaign. The
//! activate/pause/resume/abort subcommands drive the client's campaigns
//! lifecycle track; activation is deliberately separate from creation.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use ritmo_campaigns::{CampaignInput, LaunchOutcome, launch, plan_campaign};
use ritmo_config::model::RitmoConfig;
use ritmo_core::{Campaign, CampaignStatus, ClientId, Platform, RitmoError};
use ritmo_datastore::{RemoteStateStore, StoreClient};
use ritmo_datastore::tables::clients as client_rows;
use ritmo_gateway::GatewayClient;
use ritmo_lifecycle::{CampaignsEvent, StatusTracker};

/// Actions under `ritmo campaigns`.
#[derive(Subcommand, Debug)]
pub enum CampaignsAction {
    /// List campaigns, optionally for one client.
    List {
        /// Filter by client id.
        #[arg(long)]
        client: Option<String>,
        /// Write the listed rows as CSV to this file instead of printing.
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Plan and launch a campaign as a draft.
    New {
        /// Client id the campaign belongs to.
        #[arg(long)]
        client: String,
        /// Campaign name.
        #[arg(long)]
        name: String,
        /// Campaign objective, free text.
        #[arg(long)]
        objective: String,
        /// Comma-separated platforms (instagram,facebook,linkedin,tiktok,youtube,x).
        #[arg(long)]
        platforms: String,
        /// Budget in the client's currency.
        #[arg(long)]
        budget: Option<f64>,
        /// Start date (YYYY-MM-DD). Defaults to tomorrow.
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Mark a client's campaigns as running.
    Activate { id: String },
    /// Pause a client's running campaigns.
    Pause { id: String },
    /// Resume a client's paused campaigns.
    Resume { id: String },
    /// Abort a client's campaigns. Reactivate with `activate`.
    Abort { id: String },
}

pub async fn run_campaigns(
    config: &RitmoConfig,
    action: CampaignsAction,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    match action {
        CampaignsAction::List { client, export } => {
            run_list(config, client, export, json, use_color).await
        }
        CampaignsAction::New {
            client,
            name,
            objective,
            platforms,
            budget,
            start,
        } => run_new(config, client, name, objective, platforms, budget, start, json, use_color).await,
        CampaignsAction::Activate { id } => {
            run_track(config, id, CampaignsEvent::Activate, json, use_color).await
        }
        CampaignsAction::Pause { id } => {
            run_track(config, id, CampaignsEvent::Pause, json, use_color).await
        }
        CampaignsAction::Resume { id } => {
            run_track(config, id, CampaignsEvent::Resume, json, use_color).await
        }
        CampaignsAction::Abort { id } => {
            run_track(config, id, CampaignsEvent::Abort, json, use_color).await
        }
    }
}

async fn run_list(
    config: &RitmoConfig,
    client: Option<String>,
    export: Option<PathBuf>,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let gateway = GatewayClient::new(&config.gateway)?;
    let client_id = client.map(ClientId);
    let rows = gateway.campaigns(client_id.as_ref()).await?;

    if let Some(path) = export {
        export_csv(&rows, &path)?;
        if use_color {
            use colored::Colorize;
            println!("  {} {} campañas exportadas a {}", "✓".green(), rows.len(), path.display());
        } else {
            println!("  [OK] {} campañas exportadas a {}", rows.len(), path.display());
        }
        return Ok(());
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  Campañas ({})", rows.len());
    println!("  {}", "-".repeat(78));
    if rows.is_empty() {
        println!("    (sin campañas)");
    }
    for campaign in &rows {
        let platforms = campaign
            .platforms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "    {:<26} {} {:<12} {:<24} {}",
            campaign.name,
            status_cell(campaign.status, use_color),
            campaign.client_id.0,
            platforms,
            campaign
                .start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_new(
    config: &RitmoConfig,
    client: String,
    name: String,
    objective: String,
    platforms: String,
    budget: Option<f64>,
    start: Option<NaiveDate>,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let client_id = ClientId(client);
    let client = client_rows::get(&store, &client_id).await?;

    let platforms = parse_platforms(&platforms)?;
    let start_date = match start {
        Some(date) => date,
        None => Utc::now()
            .date_naive()
            .succ_opt()
            .ok_or_else(|| RitmoError::Internal("calendar overflow computing tomorrow".into()))?,
    };

    let input = CampaignInput {
        client_id,
        client_name: client.name,
        name,
        objective,
        platforms,
        budget,
        start_date,
    };
    let plan = plan_campaign(&input, Utc::now())?;

    match launch(&store, &plan).await? {
        LaunchOutcome::Created(launched) => {
            if json {
                let payload = serde_json::json!({
                    "result": "created",
                    "campaign": launched.campaign,
                    "posts": launched.posts.len(),
                    "calendar": launched.calendar,
                    "approvals": [
                        launched.plan_approval.request_id,
                        launched.batch_approval.request_id,
                    ],
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
                    "  {} Campaña creada como borrador: {} ({})",
                    "✓".green(),
                    launched.campaign.name,
                    launched.campaign.id.0
                );
            } else {
                println!(
                    "  [OK] Campaña creada como borrador: {} ({})",
                    launched.campaign.name, launched.campaign.id.0
                );
            }
            println!("    Publicaciones: {} en borrador", launched.posts.len());
            println!(
                "    Calendario: {} ({} publicaciones)",
                launched.calendar.month, launched.calendar.post_count
            );
            println!("    Aprobaciones: 2 pendientes en la cola");
        }
        LaunchOutcome::AlreadyExists(existing) => {
            if json {
                let payload = serde_json::json!({
                    "result": "already_exists",
                    "campaign": existing,
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
                    "  {} La campaña ya existía: {} ({})",
                    "!".yellow(),
                    existing.name,
                    existing.id.0
                );
            } else {
                println!("  [WARN] La campaña ya existía: {} ({})", existing.name, existing.id.0);
            }
            println!("    Misma clave de idempotencia; no se escribió nada.");
        }
    }
    Ok(())
}

/// Drive the client's campaigns lifecycle track. Illegal moves (pausing a
/// client with nothing running, say) are rejected before any write.
async fn run_track(
    config: &RitmoConfig,
    id: String,
    event: CampaignsEvent,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store)));
    let id = ClientId(id);

    let state = tracker.apply_campaigns(&id, event).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let verb = match event {
        CampaignsEvent::Activate => "activadas",
        CampaignsEvent::Pause => "en pausa",
        CampaignsEvent::Resume => "reanudadas",
        CampaignsEvent::Abort => "abortadas",
    };
    if use_color {
        use colored::Colorize;
        println!("  {} Campañas {verb} para el cliente {}", "✓".green(), id.0);
    } else {
        println!("  [OK] Campañas {verb} para el cliente {}", id.0);
    }
    println!("    Estado: {}", state.campaigns_state);
    Ok(())
}

/// Splits a comma-separated platform list. Empty segments are skipped so
/// trailing commas are harmless.
fn parse_platforms(raw: &str) -> Result<Vec<Platform>, RitmoError> {
    let mut platforms = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let platform = part.parse::<Platform>().map_err(|_| RitmoError::Validation {
            field: "platforms".into(),
            message: format!("unknown platform: {part}"),
        })?;
        platforms.push(platform);
    }
    Ok(platforms)
}

fn export_csv(rows: &[Campaign], path: &Path) -> Result<(), RitmoError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record([
            "id",
            "client_id",
            "name",
            "objective",
            "platforms",
            "budget",
            "status",
            "start_date",
            "end_date",
        ])
        .map_err(csv_error)?;
    for campaign in rows {
        let platforms = campaign
            .platforms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        let budget = campaign.budget.map(|b| b.to_string()).unwrap_or_default();
        let status = campaign.status.to_string();
        let start = campaign.start_date.map(|d| d.to_string()).unwrap_or_default();
        let end = campaign.end_date.map(|d| d.to_string()).unwrap_or_default();
        writer
            .write_record([
                campaign.id.0.as_str(),
                campaign.client_id.0.as_str(),
                campaign.name.as_str(),
                campaign.objective.as_str(),
                platforms.as_str(),
                budget.as_str(),
                status.as_str(),
                start.as_str(),
                end.as_str(),
            ])
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| RitmoError::Internal(format!("csv export failed: {e}")))?;
    Ok(())
}

fn csv_error(e: csv::Error) -> RitmoError {
    RitmoError::Internal(format!("csv export failed: {e}"))
}

/// Pads first, colors second, so ANSI codes do not skew the columns.
fn status_cell(status: CampaignStatus, use_color: bool) -> String {
    let padded = format!("{status:<10}");
    if !use_color {
        return padded;
    }
    use colored::Colorize;
    match status {
        CampaignStatus::Active => padded.green().to_string(),
        CampaignStatus::Paused => padded.yellow().to_string(),
        CampaignStatus::Completed => padded.dimmed().to_string(),
        CampaignStatus::Draft => padded,
    }
}
