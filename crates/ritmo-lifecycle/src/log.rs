// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only record of applied transitions.

use chrono::{DateTime, Utc};
use ritmo_core::{ClientId, RequestId, Track};
use serde::{Deserialize, Serialize};

/// One applied transition. Records are written after the move is accepted
/// and never updated; the per-client sequence reconstructs how a state row
/// got where it is.
///
/// `from`/`to` are stored as strings because the campaigns track and the
/// generation tracks use different vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub client_id: ClientId,
    pub track: Track,
    pub from: String,
    pub event: String,
    pub to: String,
    #[serde(default)]
    pub request_id: Option<RequestId>,
    pub recorded_at: DateTime<Utc>,
}
