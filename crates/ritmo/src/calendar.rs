// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo calendar` command implementation.
//!
//! The bare command renders a Sunday-first month grid of scheduled posts.
//! `generate` and `refresh` drive the content-calendar lifecycle track the
//! same way the brand command drives its own.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use clap::Subcommand;
use ritmo_config::model::RitmoConfig;
use ritmo_core::{ClientId, RitmoError, ScheduledPost, Track};
use ritmo_datastore::{RemoteStateStore, StoreClient};
use ritmo_gateway::GatewayClient;
use ritmo_lifecycle::StatusTracker;
use ritmo_prefs::Database;
use ritmo_prefs::queries::ui_prefs;
use tracing::debug;

use crate::generation::{self, RefreshOutcome};

/// Weekday header row, Sunday first.
const DAY_HEADERS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];
/// Column width of one day cell.
const CELL_WIDTH: usize = 14;
/// Entries shown per day before the overflow marker.
const MAX_ENTRIES_PER_DAY: usize = 3;

/// Arguments for `ritmo calendar`.
#[derive(clap::Args, Debug)]
pub struct CalendarArgs {
    /// Month to display (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub month: Option<String>,

    /// Show posts for this client only. Falls back to the saved
    /// `calendar_client_filter` preference.
    #[arg(long)]
    pub client: Option<String>,

    #[command(subcommand)]
    pub action: Option<CalendarAction>,
}

/// Content-calendar generation, mirroring `ritmo brand generate/refresh`.
#[derive(Subcommand, Debug)]
pub enum CalendarAction {
    /// Start a month's content-calendar generation.
    Generate {
        id: String,
        /// Month to generate (YYYY-MM). Defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },
    /// Poll a pending calendar generation and settle it.
    Refresh { id: String },
}

pub async fn run_calendar(
    config: &RitmoConfig,
    args: CalendarArgs,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    match args.action {
        Some(CalendarAction::Generate { id, month }) => {
            run_generate(config, id, month, json, use_color).await
        }
        Some(CalendarAction::Refresh { id }) => run_refresh(config, id, json, use_color).await,
        None => run_grid(config, args.month, args.client, json).await,
    }
}

async fn run_grid(
    config: &RitmoConfig,
    month: Option<String>,
    client: Option<String>,
    json: bool,
) -> Result<(), RitmoError> {
    let month_label = match month {
        Some(label) => label,
        None => Utc::now().format("%Y-%m").to_string(),
    };
    let (year, month) = parse_month(&month_label)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| RitmoError::Validation {
        field: "month".into(),
        message: format!("out of range: {month_label}"),
    })?;

    let client = match client {
        Some(id) => Some(id),
        None => saved_client_filter(config).await,
    };
    let client_id = client.map(ClientId);

    let gateway = GatewayClient::new(&config.gateway)?;
    let posts: Vec<ScheduledPost> = gateway
        .calendar(client_id.as_ref())
        .await?
        .into_iter()
        .filter(|post| {
            post.scheduled_date.year() == year && post.scheduled_date.month() == month
        })
        .collect();

    if json {
        let payload = serde_json::json!({ "month": month_label, "posts": posts });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    render_grid(&month_label, first, &posts, client_id.as_ref());
    Ok(())
}

/// Reads the saved client filter, treating an unusable preferences
/// database as "no filter".
async fn saved_client_filter(config: &RitmoConfig) -> Option<String> {
    let db = match Database::open_with(&config.prefs).await {
        Ok(db) => db,
        Err(e) => {
            debug!(error = %e, "preferences database unavailable, no saved filter");
            return None;
        }
    };
    let value = ui_prefs::get(&db, ui_prefs::CALENDAR_CLIENT_FILTER)
        .await
        .ok()
        .flatten();
    if let Err(e) = db.close().await {
        debug!(error = %e, "failed to close the preferences database");
    }
    value.filter(|v| !v.is_empty())
}

fn render_grid(
    month_label: &str,
    first: NaiveDate,
    posts: &[ScheduledPost],
    client: Option<&ClientId>,
) {
    let grid = month_grid(first);
    let mut by_day: HashMap<u32, Vec<&ScheduledPost>> = HashMap::new();
    for post in posts {
        by_day.entry(post.scheduled_date.day()).or_default().push(post);
    }

    println!();
    match client {
        Some(id) => println!("  Calendario {month_label} (cliente {})", id.0),
        None => println!("  Calendario {month_label}"),
    }
    let header: String = DAY_HEADERS
        .iter()
        .map(|day| format!("{day:<CELL_WIDTH$}"))
        .collect();
    println!("  {}", header.trim_end());
    println!("  {}", "-".repeat(CELL_WIDTH * 7));

    for week in grid.chunks(7) {
        let mut line = String::new();
        for cell in week {
            match cell {
                Some(day) => line.push_str(&format!("{day:<CELL_WIDTH$}")),
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        println!("  {}", line.trim_end());

        for slot in 0..MAX_ENTRIES_PER_DAY {
            let mut line = String::new();
            let mut any = false;
            for cell in week {
                let text = cell
                    .and_then(|day| by_day.get(&day))
                    .and_then(|posts| posts.get(slot))
                    .map(|post| cell_text(post));
                match text {
                    Some(text) => {
                        any = true;
                        line.push_str(&format!("{text:<CELL_WIDTH$}"));
                    }
                    None => line.push_str(&" ".repeat(CELL_WIDTH)),
                }
            }
            if any {
                println!("  {}", line.trim_end());
            }
        }

        let mut line = String::new();
        let mut any = false;
        for cell in week {
            let extra = cell
                .and_then(|day| by_day.get(&day))
                .map(|posts| posts.len().saturating_sub(MAX_ENTRIES_PER_DAY))
                .unwrap_or(0);
            if extra > 0 {
                any = true;
                let marker = format!("+{extra} más");
                line.push_str(&format!("{marker:<CELL_WIDTH$}"));
            } else {
                line.push_str(&" ".repeat(CELL_WIDTH));
            }
        }
        if any {
            println!("  {}", line.trim_end());
        }
        println!();
    }
    println!("  {} publicaciones en {month_label}", posts.len());
}

fn cell_text(post: &ScheduledPost) -> String {
    clip(&format!("{} {}", post.platform, post.status), CELL_WIDTH - 1)
}

/// Truncates to `max` characters, ellipsized. Counts chars, not bytes, so
/// multibyte platform names do not split.
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `YYYY-MM` into `(year, month)`.
fn parse_month(label: &str) -> Result<(i32, u32), RitmoError> {
    let invalid = || RitmoError::Validation {
        field: "month".into(),
        message: format!("expected YYYY-MM, got {label}"),
    };
    let (year, month) = label.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    (1..=12).contains(&month).then_some((year, month)).ok_or_else(invalid)
}

/// Day count of the month starting at `first`.
fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Cells for the month grid: leading `None`s align day 1 under its
/// weekday, Sunday first.
fn month_grid(first: NaiveDate) -> Vec<Option<u32>> {
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);
    let mut cells: Vec<Option<u32>> = vec![None; leading];
    cells.extend((1..=days).map(Some));
    cells
}

async fn run_generate(
    config: &RitmoConfig,
    id: String,
    month: Option<String>,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let month = match month {
        Some(label) => {
            parse_month(&label)?;
            label
        }
        None => Utc::now().format("%Y-%m").to_string(),
    };

    let gateway = GatewayClient::new(&config.gateway)?;
    let store = StoreClient::new(&config.datastore)?;
    let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store)));

    let started = gateway.generate_content_calendar(&id, &month).await?;
    let state = tracker
        .begin_generation(&id, Track::ContentCalendar, started.request_id.clone())
        .await?;

    if json {
        let payload = serde_json::json!({
            "request_id": started.request_id,
            "month": month,
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
            "  {} Generación del calendario {month} iniciada (request {})",
            "✓".green(),
            started.request_id.0
        );
    } else {
        println!(
            "  [OK] Generación del calendario {month} iniciada (request {})",
            started.request_id.0
        );
    }
    println!("    Estado: {}", state.content_calendar_state);
    println!("    Usa `ritmo calendar refresh {}` para comprobar el resultado.", id.0);
    Ok(())
}

async fn run_refresh(
    config: &RitmoConfig,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let id = ClientId(id);
    let gateway = GatewayClient::new(&config.gateway)?;
    let store = StoreClient::new(&config.datastore)?;
    let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store)));

    // The probe: any scheduled posts for the client means the batch landed.
    let artifact = gateway.calendar(Some(&id)).await.map(|posts| !posts.is_empty());
    let outcome = generation::settle(&tracker, &id, Track::ContentCalendar, artifact).await?;

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
                    "  {} Calendario generado (estado {})",
                    "✓".green(),
                    state.content_calendar_state
                );
            } else {
                println!("  [OK] Calendario generado (estado {})", state.content_calendar_state);
            }
        }
        RefreshOutcome::Failed(state) => {
            if use_color {
                use colored::Colorize;
                println!(
                    "  {} La generación del calendario falló (estado {})",
                    "✗".red(),
                    state.content_calendar_state
                );
            } else {
                println!(
                    "  [FAIL] La generación del calendario falló (estado {})",
                    state.content_calendar_state
                );
            }
        }
        RefreshOutcome::StillRunning => println!("  Generación aún en curso."),
        RefreshOutcome::AlreadySettled(state) => {
            println!(
                "  El calendario ya está registrado (estado {}).",
                state.content_calendar_state
            );
        }
        RefreshOutcome::NothingPending(state) => {
            println!(
                "  No hay generación pendiente (estado {}). Usa `ritmo calendar generate`.",
                state.content_calendar_state
            );
        }
    }
    Ok(())
}
