// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ritmo analytics` command implementation.
//!
//! Aggregates computed client-side from the campaign and calendar listings:
//! per-status and per-platform counts, budget totals and the publication
//! rate. The two listings load concurrently and settle independently.

use std::collections::BTreeMap;
use std::io::IsTerminal;

use ritmo_config::model::RitmoConfig;
use ritmo_core::{Campaign, ClientId, RitmoError, ScheduledPost};
use ritmo_gateway::GatewayClient;
use serde::Serialize;

/// Arguments for `ritmo analytics`.
#[derive(clap::Args, Debug)]
pub struct AnalyticsArgs {
    /// Restrict the aggregates to one client id.
    #[arg(long)]
    pub client: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct CampaignMetrics {
    total: usize,
    by_status: BTreeMap<String, usize>,
    by_platform: BTreeMap<String, usize>,
    total_budget: f64,
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct PostMetrics {
    total: usize,
    by_status: BTreeMap<String, usize>,
    by_platform: BTreeMap<String, usize>,
}

impl PostMetrics {
    /// Published posts over all posts, in percent. Zero when empty.
    fn publication_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let published = *self.by_status.get("published").unwrap_or(&0);
        published as f64 * 100.0 / self.total as f64
    }
}

pub async fn run_analytics(
    config: &RitmoConfig,
    args: AnalyticsArgs,
    json: bool,
    plain: bool,
) -> Result<(), RitmoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let gateway = GatewayClient::new(&config.gateway)?;
    let client_id = args.client.map(ClientId);

    let (campaigns, posts, warnings) = load_analytics(&gateway, client_id.as_ref()).await;
    let campaign_stats = campaigns.as_deref().map(campaign_metrics);
    let post_stats = posts.as_deref().map(post_metrics);

    if json {
        let payload = serde_json::json!({
            "campaigns": campaign_stats,
            "posts": post_stats,
            "warnings": warnings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  Analítica");
    println!("  {}", "-".repeat(40));

    if let Some(stats) = &campaign_stats {
        println!();
        println!("  Campañas ({})", stats.total);
        for (status, count) in &stats.by_status {
            println!("    {status:<20} {count:>4}");
        }
        println!("    {:<20} {:>10.2}", "Presupuesto total", stats.total_budget);
        if !stats.by_platform.is_empty() {
            println!("    Por plataforma:");
            for (platform, count) in &stats.by_platform {
                println!("      {platform:<18} {count:>4}");
            }
        }
    }

    if let Some(stats) = &post_stats {
        println!();
        println!("  Publicaciones ({})", stats.total);
        for (status, count) in &stats.by_status {
            println!("    {status:<20} {count:>4}");
        }
        println!("    {:<20} {:>4.1}%", "Tasa de publicación", stats.publication_rate());
        if !stats.by_platform.is_empty() {
            println!("    Por plataforma:");
            for (platform, count) in &stats.by_platform {
                println!("      {platform:<18} {count:>4}");
            }
        }
    }

    if !warnings.is_empty() {
        println!();
        for warning in &warnings {
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

/// Both listings fan out concurrently; a failed one becomes a warning and
/// the other still renders.
async fn load_analytics(
    gateway: &GatewayClient,
    client_id: Option<&ClientId>,
) -> (Option<Vec<Campaign>>, Option<Vec<ScheduledPost>>, Vec<String>) {
    let (campaigns, posts) = tokio::join!(gateway.campaigns(client_id), gateway.calendar(client_id));

    let mut warnings = Vec::new();
    let campaigns = match campaigns {
        Ok(rows) => Some(rows),
        Err(e) => {
            warnings.push(format!("campañas no disponibles: {e}"));
            None
        }
    };
    let posts = match posts {
        Ok(rows) => Some(rows),
        Err(e) => {
            warnings.push(format!("publicaciones no disponibles: {e}"));
            None
        }
    };
    (campaigns, posts, warnings)
}

fn campaign_metrics(campaigns: &[Campaign]) -> CampaignMetrics {
    let mut stats = CampaignMetrics {
        total: campaigns.len(),
        ..CampaignMetrics::default()
    };
    for campaign in campaigns {
        *stats.by_status.entry(campaign.status.to_string()).or_default() += 1;
        for platform in &campaign.platforms {
            *stats.by_platform.entry(platform.to_string()).or_default() += 1;
        }
        stats.total_budget += campaign.budget.unwrap_or(0.0);
    }
    stats
}

fn post_metrics(posts: &[ScheduledPost]) -> PostMetrics {
    let mut stats = PostMetrics {
        total: posts.len(),
        ..PostMetrics::default()
    };
    for post in posts {
        *stats.by_status.entry(post.status.to_string()).or_default() += 1;
        *stats.by_platform.entry(post.platform.to_string()).or_default() += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ritmo_core::{CampaignStatus, PostStatus};
    use ritmo_test_utils::fixtures;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn campaign_aggregates_cover_status_platform_and_budget() {
        let mut rows = vec![
            fixtures::campaign("cmp-1", "cl-1", "Primavera"),
            fixtures::campaign("cmp-2", "cl-1", "Verano"),
        ];
        rows[1].status = CampaignStatus::Active;
        rows[1].budget = Some(500.0);

        let stats = campaign_metrics(&rows);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_status.get("draft"), Some(&1));
        assert_eq!(stats.by_status.get("active"), Some(&1));
        // Both fixtures carry instagram + facebook.
        assert_eq!(stats.by_platform.get("instagram"), Some(&2));
        assert_eq!(stats.by_platform.get("facebook"), Some(&2));
        assert_eq!(stats.total_budget, 2000.0);
    }

    #[test]
    fn post_aggregates_count_statuses_and_platforms() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut rows = vec![
            fixtures::scheduled_post("post-1", "cl-1", date),
            fixtures::scheduled_post("post-2", "cl-1", date),
            fixtures::scheduled_post("post-3", "cl-1", date),
        ];
        rows[0].status = PostStatus::Published;
        rows[1].status = PostStatus::Published;
        rows[2].status = PostStatus::Failed;

        let stats = post_metrics(&rows);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.get("published"), Some(&2));
        assert_eq!(stats.by_status.get("failed"), Some(&1));
        assert_eq!(stats.by_platform.get("instagram"), Some(&3));
        assert!((stats.publication_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn publication_rate_is_zero_without_posts() {
        assert_eq!(PostMetrics::default().publication_rate(), 0.0);
    }

    #[tokio::test]
    async fn a_failing_listing_becomes_a_warning_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/campaigns"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "campaigns": [fixtures::campaign("cmp-1", "cl-1", "Primavera")],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/calendar"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gateway = GatewayClient::new(&ritmo_config::model::GatewayConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap();

        let (campaigns, posts, warnings) = load_analytics(&gateway, None).await;
        assert_eq!(campaigns.map(|rows| rows.len()), Some(1));
        assert!(posts.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("publicaciones"));
    }
}
