// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway response and request shapes.
//!
//! List endpoints wrap their payload in an envelope keyed by the collection
//! name. Every envelope key is `#[serde(default)]`: a malformed or missing
//! key degrades to an empty collection instead of an error.

use ritmo_core::{
    Approval, ApprovalDecision, Campaign, Client, RequestId, ScheduledPost, Specialist,
};
use serde::{Deserialize, Serialize};

/// `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub uptime_secs: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Response to the generation endpoints: the backend accepted the work and
/// issued a request id to track it by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationStarted {
    pub request_id: RequestId,
    #[serde(default)]
    pub status: Option<String>,
}

/// `POST /api/brand-dna/{id}/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationReport {
    pub quality_score: u32,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Body for `POST /api/approvals/{id}/decide`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideRequest {
    pub decision: ApprovalDecision,
    pub comments: String,
    pub decided_by: String,
}

/// `GET /api/dashboard/summary`. Counts the backend pre-aggregates for the
/// dashboard view. `Serialize` because the console re-emits it in `--json`
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub active_clients: u64,
    #[serde(default)]
    pub active_campaigns: u64,
    #[serde(default)]
    pub posts_this_month: u64,
    #[serde(default)]
    pub pending_approvals: u64,
    #[serde(default)]
    pub urgent_approvals: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClientsEnvelope {
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CampaignsEnvelope {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApprovalsEnvelope {
    #[serde(default)]
    pub approvals: Vec<Approval>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<ScheduledPost>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpecialistsEnvelope {
    #[serde(default)]
    pub specialists: Vec<Specialist>,
}

/// Error body the backend sends on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub detail: String,
}
