// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign planning and launch.
//!
//! A campaign starts as operator input (client, name, objective, platforms,
//! start date), becomes a pure [`CampaignPlan`] (eight scheduled drafts, a
//! calendar summary, two approval-queue items), and is persisted by
//! [`launch`] behind an idempotency-key guard so double submissions cannot
//! duplicate the artifacts.

pub mod launch;
pub mod objective;
pub mod plan;
pub mod schedule;
pub mod templates;

pub use launch::{LaunchOutcome, LaunchedCampaign, launch};
pub use objective::{Category, categorize};
pub use plan::{CampaignInput, CampaignPlan, PLANNER_BOT, idempotency_key, plan_campaign, slug};
pub use schedule::{POSTS_PER_CAMPAIGN, schedule_dates};
