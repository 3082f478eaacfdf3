// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisting a [`CampaignPlan`].

use ritmo_core::{Approval, Campaign, ContentCalendar, RitmoError, ScheduledPost};
use ritmo_datastore::{StoreClient, tables};
use tracing::info;

use crate::plan::CampaignPlan;

/// What a launch produced.
#[derive(Debug, Clone)]
pub enum LaunchOutcome {
    Created(LaunchedCampaign),
    /// The idempotency key already has a campaign; nothing was written.
    AlreadyExists(Campaign),
}

/// The persisted artifacts of a successful launch.
#[derive(Debug, Clone)]
pub struct LaunchedCampaign {
    pub campaign: Campaign,
    pub posts: Vec<ScheduledPost>,
    pub calendar: ContentCalendar,
    pub plan_approval: Approval,
    pub batch_approval: Approval,
}

/// Writes the plan to the store: campaign first, then the posts, the
/// calendar summary and the two approval items, all carrying the created
/// campaign's id. The idempotency lookup runs before any write, so
/// re-submitting the same plan returns the existing campaign untouched.
pub async fn launch(store: &StoreClient, plan: &CampaignPlan) -> Result<LaunchOutcome, RitmoError> {
    if let Some(existing) =
        tables::campaigns::find_by_idempotency_key(store, &plan.idempotency_key).await?
    {
        info!(
            campaign = %existing.id.0,
            key = %plan.idempotency_key,
            "launch skipped, key already has a campaign"
        );
        return Ok(LaunchOutcome::AlreadyExists(existing));
    }

    let campaign = tables::campaigns::insert(store, &plan.campaign).await?;

    let mut posts = plan.posts.clone();
    for post in &mut posts {
        post.campaign_id = Some(campaign.id.clone());
    }
    let posts = tables::posts::insert_batch(store, &posts).await?;

    let mut calendar = plan.calendar.clone();
    calendar.campaign_id = Some(campaign.id.clone());
    let calendar = tables::calendars::insert(store, &calendar).await?;

    let plan_approval = tables::approvals::insert(store, &plan.plan_approval).await?;
    let batch_approval = tables::approvals::insert(store, &plan.batch_approval).await?;

    info!(
        campaign = %campaign.id.0,
        posts = posts.len(),
        "campaign launched as draft"
    );

    Ok(LaunchOutcome::Created(LaunchedCampaign {
        campaign,
        posts,
        calendar,
        plan_approval,
        batch_approval,
    }))
}
