// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo clients` command implementation.
//!
//! Account management: listing, a detail view that aggregates record,
//! lifecycle state and content counts, the five-step creation wizard, and
//! the archive/delete operations.

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Subcommand;
use ritmo_config::model::RitmoConfig;
use ritmo_core::{ClientId, ClientState, ClientStatus, RitmoError, Track};
use ritmo_datastore::tables::{campaigns as campaign_rows, clients as client_rows, posts as post_rows};
use ritmo_datastore::{RemoteStateStore, StoreClient};
use ritmo_gateway::GatewayClient;
use ritmo_lifecycle::StatusTracker;
use ritmo_wizard::{Advance, ClientWizard, INDUSTRIES, IncompleteStep, MIN_BRIEF_CHARS, WizardStep};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

/// Actions under `ritmo clients`.
#[derive(Subcommand, Debug)]
pub enum ClientsAction {
    /// List client accounts, active ones by default.
    List {
        /// Include paused and archived accounts.
        #[arg(long)]
        all: bool,
    },
    /// Show one client: record, lifecycle state and content counts.
    Show { id: String },
    /// Create a client through the five-step wizard.
    New,
    /// Archive a client account (version-checked).
    Archive { id: String },
    /// Delete a client row. Campaigns and posts are left in place.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run_clients(
    config: &RitmoConfig,
    action: ClientsAction,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    match action {
        ClientsAction::List { all } => run_list(config, all, json, use_color).await,
        ClientsAction::Show { id } => run_show(config, id, json, use_color).await,
        ClientsAction::New => run_new(config, json, use_color).await,
        ClientsAction::Archive { id } => run_archive(config, id, json, use_color).await,
        ClientsAction::Delete { id, force } => run_delete(config, id, force, use_color).await,
    }
}

async fn run_list(
    config: &RitmoConfig,
    all: bool,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let rows = client_rows::list(&store, all).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  Clientes ({})", rows.len());
    println!("  {}", "-".repeat(66));
    if rows.is_empty() {
        println!("    (sin clientes)");
    }
    for client in &rows {
        println!(
            "    {:<28} {} {:<24} {}",
            client.name,
            status_cell(client.status, use_color),
            client.industry,
            client.created_at.format("%Y-%m-%d")
        );
    }
    println!();
    Ok(())
}

async fn run_show(
    config: &RitmoConfig,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let gateway = GatewayClient::new(&config.gateway)?;
    let id = ClientId(id);

    // The record is the backbone of the view; the other three loads settle
    // independently and degrade to warnings.
    let (record, state, campaign_count, post_count) = tokio::join!(
        client_rows::get(&store, &id),
        load_status(&gateway, &store, &id),
        campaign_rows::count_for_client(&store, &id),
        post_rows::count_for_client(&store, &id),
    );
    let client = record?;

    let mut warnings = Vec::new();
    let state = match state {
        Ok(state) => Some(state),
        Err(e) => {
            warnings.push(format!("estado no disponible: {e}"));
            None
        }
    };
    let campaign_count = match campaign_count {
        Ok(n) => Some(n),
        Err(e) => {
            warnings.push(format!("campañas no disponibles: {e}"));
            None
        }
    };
    let post_count = match post_count {
        Ok(n) => Some(n),
        Err(e) => {
            warnings.push(format!("posts no disponibles: {e}"));
            None
        }
    };

    if json {
        let payload = serde_json::json!({
            "client": client,
            "state": state,
            "campaign_count": campaign_count,
            "post_count": post_count,
            "warnings": warnings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  {}", client.name);
    println!("  {}", "-".repeat(50));
    println!("    Id:         {}", client.id.0);
    println!("    Industria:  {}", client.industry);
    if let Some(website) = &client.website {
        println!("    Web:        {website}");
    }
    if let Some(brief) = &client.brief {
        println!("    Brief:      {brief}");
    }
    println!("    Estado:     {}", status_cell(client.status, use_color));
    println!("    Creado:     {}", client.created_at.format("%Y-%m-%d"));
    println!("    Versión:    {}", client.version);

    if let Some(state) = &state {
        println!();
        println!("  Ciclo de vida");
        println!("    Brand DNA:   {}", track_cell(state, Track::BrandDna));
        println!("    Calendario:  {}", track_cell(state, Track::ContentCalendar));
        println!("    Campañas:    {}", state.campaigns_state);
    }

    if campaign_count.is_some() || post_count.is_some() {
        println!();
        if let Some(n) = campaign_count {
            println!("    Campañas: {n}");
        }
        if let Some(n) = post_count {
            println!("    Posts:    {n}");
        }
    }

    print_warnings(&warnings, use_color);
    println!();
    Ok(())
}

/// Lifecycle state for one client: the gateway is authoritative, the store
/// is the fallback when the gateway is down.
async fn load_status(
    gateway: &GatewayClient,
    store: &StoreClient,
    id: &ClientId,
) -> Result<ClientState, RitmoError> {
    match gateway.client_state(id).await {
        Ok(Some(state)) => Ok(state),
        Ok(None) => Ok(ClientState::for_client(id.clone())),
        Err(e) => {
            debug!(error = %e, "gateway state read failed, falling back to the store");
            let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(store.clone())));
            tracker.get_status(id).await
        }
    }
}

async fn run_new(config: &RitmoConfig, json: bool, use_color: bool) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let gateway = GatewayClient::new(&config.gateway)?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| RitmoError::Internal(format!("failed to initialize readline: {e}")))?;
    let mut wizard = ClientWizard::new();

    println!();
    println!("  Nuevo cliente");
    println!("  {}", "-".repeat(40));

    let new_client = loop {
        let step = wizard.step();
        print_step_header(step, use_color);

        let filled = match step {
            WizardStep::BasicInfo => fill_basic_info(&mut rl, &mut wizard)?,
            WizardStep::DigitalPresence => fill_digital_presence(&mut rl, &mut wizard)?,
            WizardStep::VisualIdentity => fill_visual_identity(&mut rl, &mut wizard)?,
            WizardStep::InitialBrief => fill_brief(&mut rl, &mut wizard)?,
            WizardStep::Confirmation => confirm(&mut rl, &wizard)?,
        };
        if !filled {
            println!("  Cancelado.");
            return Ok(());
        }

        match wizard.advance() {
            Ok(Advance::Complete(new_client)) => break new_client,
            Ok(Advance::Moved(_)) => {}
            Err(incomplete) => print_requirements(&incomplete, use_color),
        }
    };

    let client = client_rows::insert(&store, &new_client).await?;

    if let Err(e) = gateway.initialize_client(&client.id).await {
        warn!(error = %e, "lifecycle initialization failed, the state row will appear on first transition");
        if use_color {
            use colored::Colorize;
            println!("  {} estado inicial no creado: {e}", "!".yellow());
        } else {
            println!("  [WARN] estado inicial no creado: {e}");
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&client).unwrap_or_else(|_| "{}".to_string())
        );
    } else if use_color {
        use colored::Colorize;
        println!();
        println!("  {} Cliente creado: {} ({})", "✓".green(), client.name, client.id.0);
    } else {
        println!();
        println!("  [OK] Cliente creado: {} ({})", client.name, client.id.0);
    }
    Ok(())
}

async fn run_archive(
    config: &RitmoConfig,
    id: String,
    json: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let id = ClientId(id);

    let client = client_rows::get(&store, &id).await?;
    let archived = client_rows::archive(&store, &id, client.version).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&archived).unwrap_or_else(|_| "{}".to_string())
        );
    } else if use_color {
        use colored::Colorize;
        println!("  {} Cliente archivado: {}", "✓".green(), archived.name);
    } else {
        println!("  [OK] Cliente archivado: {}", archived.name);
    }
    Ok(())
}

async fn run_delete(
    config: &RitmoConfig,
    id: String,
    force: bool,
    use_color: bool,
) -> Result<(), RitmoError> {
    let store = StoreClient::new(&config.datastore)?;
    let id = ClientId(id);

    let client = client_rows::get(&store, &id).await?;

    if !force {
        let mut rl = DefaultEditor::new()
            .map_err(|e| RitmoError::Internal(format!("failed to initialize readline: {e}")))?;
        let prompt = format!(
            "  ¿Eliminar el cliente \"{}\"? Sus campañas y posts no se eliminan. (s/n): ",
            client.name
        );
        let Some(answer) = prompt_line(&mut rl, &prompt)? else {
            println!("  Cancelado.");
            return Ok(());
        };
        if !is_yes(&answer) {
            println!("  Cancelado.");
            return Ok(());
        }
    }

    client_rows::delete(&store, &id).await?;

    if use_color {
        use colored::Colorize;
        println!("  {} Cliente eliminado: {}", "✓".green(), client.name);
    } else {
        println!("  [OK] Cliente eliminado: {}", client.name);
    }
    Ok(())
}

// -- wizard screens ----------------------------------------------------------

fn fill_basic_info(rl: &mut DefaultEditor, wizard: &mut ClientWizard) -> Result<bool, RitmoError> {
    let Some(name) = prompt_line(rl, "    Nombre: ")? else {
        return Ok(false);
    };
    wizard.draft_mut().name = name;

    println!("    Industria:");
    for (i, industry) in INDUSTRIES.iter().enumerate() {
        println!("      {:>2}. {industry}", i + 1);
    }
    let Some(choice) = prompt_line(rl, "    Número u otra industria: ")? else {
        return Ok(false);
    };
    wizard.draft_mut().industry = resolve_industry(&choice);
    Ok(true)
}

fn fill_digital_presence(
    rl: &mut DefaultEditor,
    wizard: &mut ClientWizard,
) -> Result<bool, RitmoError> {
    let Some(website) = prompt_line(rl, "    Sitio web (opcional): ")? else {
        return Ok(false);
    };
    wizard.draft_mut().website = website;
    Ok(true)
}

fn fill_visual_identity(
    rl: &mut DefaultEditor,
    wizard: &mut ClientWizard,
) -> Result<bool, RitmoError> {
    let Some(logo_url) = prompt_line(rl, "    URL del logo (opcional): ")? else {
        return Ok(false);
    };
    wizard.draft_mut().logo_url = logo_url;
    Ok(true)
}

fn fill_brief(rl: &mut DefaultEditor, wizard: &mut ClientWizard) -> Result<bool, RitmoError> {
    println!("    El brief necesita al menos {MIN_BRIEF_CHARS} caracteres.");
    let Some(brief) = prompt_line(rl, "    Brief: ")? else {
        return Ok(false);
    };
    wizard.draft_mut().brief = brief;
    Ok(true)
}

fn confirm(rl: &mut DefaultEditor, wizard: &ClientWizard) -> Result<bool, RitmoError> {
    let draft = wizard.draft();
    println!("    Nombre:    {}", draft.name.trim());
    println!("    Industria: {}", draft.industry.trim());
    if !draft.website.trim().is_empty() {
        println!("    Web:       {}", draft.website.trim());
    }
    if !draft.logo_url.trim().is_empty() {
        println!("    Logo:      {}", draft.logo_url.trim());
    }
    println!("    Brief:     {} caracteres", draft.brief.trim().chars().count());

    let Some(answer) = prompt_line(rl, "    ¿Crear el cliente? (s/n): ")? else {
        return Ok(false);
    };
    Ok(is_yes(&answer))
}

/// One trimmed line of input. `None` means the operator cancelled with
/// Ctrl+C or Ctrl+D.
fn prompt_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>, RitmoError> {
    match rl.readline(prompt) {
        Ok(line) => {
            let _ = rl.add_history_entry(&line);
            Ok(Some(line.trim().to_string()))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(RitmoError::Internal(format!("readline failed: {e}"))),
    }
}

/// A number picks from the fixed industry list; anything else is taken
/// verbatim.
fn resolve_industry(input: &str) -> String {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        if (1..=INDUSTRIES.len()).contains(&n) {
            return INDUSTRIES[n - 1].to_string();
        }
    }
    trimmed.to_string()
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

fn print_step_header(step: WizardStep, use_color: bool) {
    println!();
    let header = format!("Paso {} de {}: {}", step.number(), WizardStep::COUNT, step.title());
    if use_color {
        use colored::Colorize;
        println!("  {}", header.bold());
    } else {
        println!("  {header}");
    }
}

fn print_requirements(incomplete: &IncompleteStep, use_color: bool) {
    for requirement in &incomplete.requirements {
        if use_color {
            use colored::Colorize;
            println!("    {} {}", "!".yellow(), requirement.yellow());
        } else {
            println!("    [WARN] {requirement}");
        }
    }
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

/// Status padded to column width first, colored second, so ANSI codes do
/// not break the alignment.
fn status_cell(status: ClientStatus, use_color: bool) -> String {
    let padded = format!("{:<10}", status.to_string());
    if !use_color {
        return padded;
    }
    use colored::Colorize;
    match status {
        ClientStatus::Active => padded.green().to_string(),
        ClientStatus::Paused => padded.yellow().to_string(),
        ClientStatus::Archived => padded.dimmed().to_string(),
    }
}

fn track_cell(state: &ClientState, track: Track) -> String {
    let label = StatusTracker::track_state(state, track)
        .map(|s| s.to_string())
        .unwrap_or_default();
    match StatusTracker::pending_request(state, track) {
        Some(request) => format!("{label} ({})", request.0),
        None => label,
    }
}
