// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo approvals` command implementation.
//!
//! The queue holds items submitted by the specialist bots. Listing defaults
//! to pending, or to the operator's saved filter. Deciding goes through the
//! gateway so the backend can react; when the gateway cannot be reached the
//! verdict is written straight to the store (last write wins), and
//! `--expected-version` forces the direct, version-checked write instead.

use std::io::IsTerminal;

use clap::Subcommand;
use ritmo_config::model::RitmoConfig;
use ritmo_core::{Approval, ApprovalDecision, ApprovalStatus, Priority, RequestId, RitmoError};
use ritmo_datastore::StoreClient;
use ritmo_datastore::tables::approvals as approval_rows;
use ritmo_gateway::{DecideRequest, GatewayClient};
use ritmo_prefs::Database;
use ritmo_prefs::queries::ui_prefs;
use tracing::debug;

/// Actions under `ritmo approvals`.
#[derive(Subcommand, Debug)]
pub enum ApprovalsAction {
    /// List queue items, pending by default.
    List {
        /// Filter by status (pending, approved, rejected).
        #[arg(long)]
        status: Option<String>,
        /// Show every item regardless of status.
        #[arg(long, conflicts_with = "status")]
        all: bool,
    },
    /// Record a verdict on one item.
    Decide {
        request_id: String,
        /// Approve the item.
        #[arg(long, conflicts_with = "reject")]
        approve: bool,
        /// Reject the item.
        #[arg(long)]
        reject: bool,
        /// Free-text comment stored with the verdict.
        #[arg(long)]
        comments: Option<String>,
        /// Write directly to the store, checked against this row version.
        #[arg(long)]
        expected_version: Option<i64>,
    },
}

pub async fn run_approvals(
    config: &RitmoConfig,
    action: ApprovalsAction,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    match action {
        ApprovalsAction::List { status, all } => {
            run_list(config, status, all, json, use_color).await
        }
        ApprovalsAction::Decide {
            request_id,
            approve,
            reject,
            comments,
            expected_version,
        } => {
            run_decide(config, request_id, approve, reject, comments, expected_version, json, use_color)
                .await
        }
    }
}

async fn run_list(
    config: &RitmoConfig,
    status: Option<String>,
    all: bool,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let filter = if all {
        None
    } else {
        match status {
            Some(status) => Some(parse_status(&status)?),
            None => Some(saved_filter(config).await),
        }
    };

    let gateway = GatewayClient::new(&config.gateway)?;
    let items = gateway.approvals(filter).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    println!();
    match filter {
        Some(status) => println!("  Aprobaciones ({status}) ({})", items.len()),
        None => println!("  Aprobaciones ({})", items.len()),
    }
    println!("  {}", "-".repeat(84));
    if items.is_empty() {
        println!("    (sin elementos)");
    }
    for item in &items {
        println!(
            "    {} {:<40} {:<12} {:<20} {}",
            priority_cell(item.priority, use_color),
            item.summary.title(),
            item.client_id.0,
            item.bot,
            item.submitted_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_decide(
    config: &RitmoConfig,
    request_id: String,
    approve: bool,
    reject: bool,
    comments: Option<String>,
    expected_version: Option<i64>,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let decision = match (approve, reject) {
        (true, false) => ApprovalDecision::Approved,
        (false, true) => ApprovalDecision::Rejected,
        _ => {
            return Err(RitmoError::Validation {
                field: "decision".into(),
                message: "pass exactly one of --approve or --reject".into(),
            });
        }
    };

    let request_id = RequestId(request_id);
    let comments = comments.unwrap_or_else(|| default_comment(decision).to_string());
    let decided_by = config.operator.name.clone();

    let gateway = GatewayClient::new(&config.gateway)?;
    let store = StoreClient::new(&config.datastore)?;
    let decided = decide_with(
        &gateway,
        &store,
        &request_id,
        decision,
        &comments,
        &decided_by,
        expected_version,
    )
    .await?;

    let remaining = gateway.approvals(Some(ApprovalStatus::Pending)).await;

    if json {
        let payload = serde_json::json!({
            "approval": decided,
            "pending": remaining.as_ref().map(|items| items.len()).ok(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    if use_color {
        use colored::Colorize;
        println!("  {} {}", "✓".green(), decided.summary.title());
    } else {
        println!("  [OK] {}", decided.summary.title());
    }
    println!("    Estado: {}", decided.status);
    println!("    Comentario: {comments}");
    println!("    Decidido por: {decided_by}");

    match remaining {
        Ok(items) => println!("  {} elementos pendientes en la cola", items.len()),
        Err(e) => {
            if use_color {
                use colored::Colorize;
                println!("  {} cola pendiente no disponible: {e}", "!".yellow());
            } else {
                println!("  [WARN] cola pendiente no disponible: {e}");
            }
        }
    }
    Ok(())
}

/// The verdict write. `--expected-version` always goes straight to the
/// store so the version check decides; otherwise the gateway is tried
/// first and a transport failure falls back to a direct write.
async fn decide_with(
    gateway: &GatewayClient,
    store: &StoreClient,
    request_id: &RequestId,
    decision: ApprovalDecision,
    comments: &str,
    decided_by: &str,
    expected_version: Option<i64>,
) -> Result<Approval, RitmoError> {
    if let Some(version) = expected_version {
        return approval_rows::decide(store, request_id, decision, comments, decided_by, Some(version))
            .await;
    }

    let request = DecideRequest {
        decision,
        comments: comments.to_string(),
        decided_by: decided_by.to_string(),
    };
    match gateway.decide_approval(request_id, &request).await {
        Ok(decided) => Ok(decided),
        Err(RitmoError::Gateway { status: None, message, .. }) => {
            debug!(reason = %message, "gateway unreachable, deciding directly against the store");
            approval_rows::decide(store, request_id, decision, comments, decided_by, None).await
        }
        Err(e) => Err(e),
    }
}

/// Reads the saved status filter, defaulting to pending when the
/// preferences database or the stored value is unusable.
async fn saved_filter(config: &RitmoConfig) -> ApprovalStatus {
    let db = match Database::open_with(&config.prefs).await {
        Ok(db) => db,
        Err(e) => {
            debug!(error = %e, "preferences database unavailable, defaulting to pending");
            return ApprovalStatus::Pending;
        }
    };
    let value = ui_prefs::get(&db, ui_prefs::DEFAULT_APPROVALS_FILTER)
        .await
        .ok()
        .flatten();
    if let Err(e) = db.close().await {
        debug!(error = %e, "failed to close the preferences database");
    }
    value.and_then(|v| v.parse().ok()).unwrap_or(ApprovalStatus::Pending)
}

fn parse_status(raw: &str) -> Result<ApprovalStatus, RitmoError> {
    raw.parse().map_err(|_| RitmoError::Validation {
        field: "status".into(),
        message: format!("unknown status: {raw} (pending, approved, rejected)"),
    })
}

fn default_comment(decision: ApprovalDecision) -> &'static str {
    match decision {
        ApprovalDecision::Approved => "Aprobado",
        ApprovalDecision::Rejected => "Rechazado",
    }
}

/// Pads first, colors second, so ANSI codes do not skew the columns.
fn priority_cell(priority: Priority, use_color: bool) -> String {
    let padded = format!("{:<4}", priority.to_string().to_uppercase());
    if !use_color {
        return padded;
    }
    use colored::Colorize;
    match priority {
        Priority::P0 => padded.red().to_string(),
        Priority::P1 => padded.yellow().to_string(),
        _ => padded,
    }
}
