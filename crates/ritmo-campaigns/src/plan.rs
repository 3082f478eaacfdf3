// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning operator input into the full set of launch artifacts.
//!
//! Planning is side-effect free: it computes the campaign row, the eight
//! draft posts, the calendar summary and the two approval items without
//! touching the store, so it can be tested exhaustively and re-run safely.
//! Persisting the plan is [`crate::launch`]'s job.

use chrono::{DateTime, NaiveDate, Utc};
use ritmo_core::{
    ApprovalStatus, ApprovalSummary, CalendarStatus, CampaignStatus, ClientId, NewApproval,
    NewCampaign, NewContentCalendar, NewScheduledPost, Platform, PostStatus, Priority, RequestId,
    RitmoError,
};

use crate::objective::categorize;
use crate::schedule::{POSTS_PER_CAMPAIGN, schedule_dates, week_number};
use crate::templates;

/// Bot name recorded on the synthesized approval items.
pub const PLANNER_BOT: &str = "campaign-planner";

/// Operator input for a new campaign.
#[derive(Debug, Clone)]
pub struct CampaignInput {
    pub client_id: ClientId,
    /// Needed for template interpolation; callers pass the client row's name.
    pub client_name: String,
    pub name: String,
    pub objective: String,
    pub platforms: Vec<Platform>,
    pub budget: Option<f64>,
    pub start_date: NaiveDate,
}

/// Everything a launch persists, computed up front.
#[derive(Debug, Clone)]
pub struct CampaignPlan {
    pub campaign: NewCampaign,
    pub posts: Vec<NewScheduledPost>,
    pub calendar: NewContentCalendar,
    /// "Approve the campaign plan" queue item.
    pub plan_approval: NewApproval,
    /// "Approve the content batch" queue item.
    pub batch_approval: NewApproval,
    pub idempotency_key: String,
}

/// URL- and key-safe form of a campaign name: lowercase, runs of
/// non-alphanumeric characters collapsed to single dashes.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    out
}

/// The key `launch` checks before inserting anything. Two submissions of
/// the same client + name + start date produce the same key, which is what
/// makes a double-click harmless.
pub fn idempotency_key(client_id: &ClientId, name: &str, start_date: NaiveDate) -> String {
    format!("{}:{}:{}", client_id.0, slug(name), start_date)
}

/// Computes the launch artifacts. `now` stamps the approval items.
pub fn plan_campaign(input: &CampaignInput, now: DateTime<Utc>) -> Result<CampaignPlan, RitmoError> {
    if input.platforms.is_empty() {
        return Err(RitmoError::Validation {
            field: "platforms".into(),
            message: "at least one platform is required".into(),
        });
    }

    let category = categorize(&input.objective);
    let dates = schedule_dates(input.start_date, POSTS_PER_CAMPAIGN);
    let end_date = dates.last().copied();

    let posts: Vec<NewScheduledPost> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| NewScheduledPost {
            client_id: input.client_id.clone(),
            // Filled in by launch once the campaign row exists.
            campaign_id: None,
            content: templates::render(category, i, &input.client_name, week_number(i)),
            platform: input.platforms[i % input.platforms.len()],
            scheduled_date: *date,
            status: PostStatus::Draft,
        })
        .collect();

    let key = idempotency_key(&input.client_id, &input.name, input.start_date);

    let campaign = NewCampaign {
        client_id: input.client_id.clone(),
        name: input.name.clone(),
        objective: input.objective.clone(),
        platforms: input.platforms.clone(),
        budget: input.budget,
        status: CampaignStatus::Draft,
        start_date: Some(input.start_date),
        end_date,
        idempotency_key: Some(key.clone()),
    };

    let calendar = NewContentCalendar {
        client_id: input.client_id.clone(),
        campaign_id: None,
        month: input.start_date.format("%Y-%m").to_string(),
        post_count: posts.len() as u32,
        status: CalendarStatus::Draft,
    };

    let plan_approval = NewApproval {
        request_id: RequestId::generate(),
        client_id: input.client_id.clone(),
        bot: PLANNER_BOT.into(),
        priority: Priority::P1,
        status: ApprovalStatus::Pending,
        summary: ApprovalSummary::Card {
            title: format!("Aprobar plan de campaña: {}", input.name),
            description: format!("Objetivo: {}", input.objective),
        },
        submitted_at: now,
    };

    let batch_approval = NewApproval {
        request_id: RequestId::generate(),
        client_id: input.client_id.clone(),
        bot: PLANNER_BOT.into(),
        priority: Priority::P2,
        status: ApprovalStatus::Pending,
        summary: ApprovalSummary::Card {
            title: format!("Aprobar lote de contenido: {}", input.name),
            description: format!("{} publicaciones en borrador", posts.len()),
        },
        submitted_at: now,
    };

    Ok(CampaignPlan {
        campaign,
        posts,
        calendar,
        plan_approval,
        batch_approval,
        idempotency_key: key,
    })
}
