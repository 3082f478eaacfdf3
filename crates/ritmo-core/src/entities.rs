// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain entities, shaped to the rows the hosted store returns.
//!
//! `New*` types are the insert payloads: no id, no timestamps, no version —
//! the store fills those in and the `Prefer: return=representation` response
//! comes back as the full entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::{
    ApprovalStatus, CampaignId, CampaignStatus, ClientId, ClientStatus, Platform, PostId,
    PostStatus, Priority, RequestId,
};

/// A client account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub brief: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub version: i64,
}

/// Insert payload for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    pub status: ClientStatus,
}

/// A content campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub client_id: ClientId,
    pub name: String,
    pub objective: String,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub budget: Option<f64>,
    pub status: CampaignStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: i64,
}

/// Insert payload for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub client_id: ClientId,
    pub name: String,
    pub objective: String,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub status: CampaignStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// A post on the content calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub id: PostId,
    pub client_id: ClientId,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    pub content: String,
    pub platform: Platform,
    pub scheduled_date: NaiveDate,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: i64,
}

/// Insert payload for a scheduled post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScheduledPost {
    pub client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    pub content: String,
    pub platform: Platform,
    pub scheduled_date: NaiveDate,
    pub status: PostStatus,
}

/// The brand-DNA artifact produced by the backend for a client.
///
/// `content_hash` is the artifact's version tag: regeneration changes it,
/// so a stale read is detectable without comparing every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDna {
    pub client_id: ClientId,
    pub essence: String,
    pub tone: String,
    pub positioning: String,
    pub target_audience: String,
    pub visual_style: String,
    pub narrative: String,
    pub differentiation: String,
    pub quality_score: u32,
    #[serde(default)]
    pub approved: bool,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Status of a content-calendar summary row. The batch starts `draft` and
/// flips to `approved` when its approval-queue item is decided.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CalendarStatus {
    Draft,
    Approved,
}

/// Summary row describing one month's generated batch of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCalendar {
    pub id: String,
    pub client_id: ClientId,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    /// `YYYY-MM`.
    pub month: String,
    pub post_count: u32,
    pub status: CalendarStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a content-calendar summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContentCalendar {
    pub client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    pub month: String,
    pub post_count: u32,
    pub status: CalendarStatus,
}

/// Summary payload of an approval item. Older bots submit plain text,
/// newer ones a title/description card; both shapes appear in the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApprovalSummary {
    Card {
        title: String,
        #[serde(default)]
        description: String,
    },
    Text(String),
}

impl ApprovalSummary {
    pub fn title(&self) -> &str {
        match self {
            ApprovalSummary::Card { title, .. } => title,
            ApprovalSummary::Text(text) => text,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ApprovalSummary::Card { description, .. } if !description.is_empty() => {
                Some(description)
            }
            _ => None,
        }
    }
}

/// An item in the approval queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub request_id: RequestId,
    pub client_id: ClientId,
    /// Which specialist bot submitted the item.
    pub bot: String,
    pub priority: Priority,
    pub status: ApprovalStatus,
    pub summary: ApprovalSummary,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub decided_by: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub version: i64,
}

/// Insert payload for an approval-queue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApproval {
    pub request_id: RequestId,
    pub client_id: ClientId,
    pub bot: String,
    pub priority: Priority,
    pub status: ApprovalStatus,
    pub summary: ApprovalSummary,
    pub submitted_at: DateTime<Utc>,
}

/// A backend specialist bot, as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}
