// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifiers and status vocabularies shared across the Ritmo workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a client account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Unique identifier for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignId(pub String);

/// Unique identifier for a scheduled post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

/// Identifier for a backend request: approval-queue items are keyed by the
/// request that produced them, and pending generations persist their
/// request id as a token until the backend confirms or fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Mint a fresh id for work originated on this side (synthesized
    /// approval items, idempotency probes).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Account standing of a client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Paused,
    Archived,
}

/// Status of a campaign row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

/// Status of a scheduled post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

/// Status of an approval-queue item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// An operator's verdict on an approval-queue item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl From<ApprovalDecision> for ApprovalStatus {
    fn from(decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => ApprovalStatus::Approved,
            ApprovalDecision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

/// Priority of an approval-queue item. `P0` and `P1` are urgent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl Priority {
    /// Urgent items get their own count on the dashboard.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::P0 | Priority::P1)
    }
}

/// Social platform a post targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Facebook,
    Linkedin,
    Tiktok,
    Youtube,
    X,
}

/// One of the three lifecycle tracks recorded per client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Track {
    BrandDna,
    ContentCalendar,
    Campaigns,
}

/// Status vocabulary for the generation tracks (brand DNA, content calendar).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrackState {
    NotStarted,
    InProgress,
    Generated,
    Validated,
    Approved,
    Rejected,
    Failed,
}

impl TrackState {
    /// `approved` admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrackState::Approved)
    }
}

/// Status vocabulary for the campaigns track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignsState {
    Inactive,
    Active,
    Paused,
    Aborted,
}

/// The per-client lifecycle row. Columns are flat to match the stored shape.
///
/// A client with no stored row is indistinguishable from one whose row holds
/// the defaults below; readers materialize [`ClientState::for_client`] when
/// the store has nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    pub client_id: ClientId,
    pub brand_dna_state: TrackState,
    #[serde(default)]
    pub brand_dna_request: Option<RequestId>,
    pub content_calendar_state: TrackState,
    #[serde(default)]
    pub content_calendar_request: Option<RequestId>,
    pub campaigns_state: CampaignsState,
    #[serde(default)]
    pub version: i64,
    pub last_updated: DateTime<Utc>,
}

impl ClientState {
    /// The default triple: nothing generated, campaigns inactive.
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client_id,
            brand_dna_state: TrackState::NotStarted,
            brand_dna_request: None,
            content_calendar_state: TrackState::NotStarted,
            content_calendar_request: None,
            campaigns_state: CampaignsState::Inactive,
            version: 0,
            last_updated: Utc::now(),
        }
    }
}
