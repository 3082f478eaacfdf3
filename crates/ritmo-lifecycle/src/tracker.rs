// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tracker: load, transition, persist, log.
//!
//! All lifecycle writes go through here so that no caller can store a state
//! the legal-move tables reject. Reads are tolerant: a client with no stored
//! row reads as the default triple.

use std::sync::Arc;

use chrono::Utc;
use ritmo_core::{ClientId, ClientState, RequestId, RitmoError, Track, TrackState};

use crate::log::TransitionRecord;
use crate::machine::{self, CampaignsEvent, TrackEvent};
use crate::store::StateStore;

/// Applies lifecycle events over a [`StateStore`].
#[derive(Clone)]
pub struct StatusTracker {
    store: Arc<dyn StateStore>,
}

impl StatusTracker {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Current state for a client. A missing row yields the default triple
    /// (`not_started`, `not_started`, `inactive`) — never an error.
    pub async fn get_status(&self, client_id: &ClientId) -> Result<ClientState, RitmoError> {
        Ok(self
            .store
            .load(client_id)
            .await?
            .unwrap_or_else(|| ClientState::for_client(client_id.clone())))
    }

    /// Apply an event to one of the generation tracks.
    ///
    /// Loads (or defaults) the row, runs the legal-move table, bumps the
    /// version, saves with the old version as the write guard, and appends
    /// a log record. Rejected moves leave the store untouched.
    pub async fn apply(
        &self,
        client_id: &ClientId,
        track: Track,
        event: TrackEvent,
    ) -> Result<ClientState, RitmoError> {
        let mut state = self.get_status(client_id).await?;
        let expected = state.version;

        let (from, pending) = match track {
            Track::BrandDna => (state.brand_dna_state, state.brand_dna_request.clone()),
            Track::ContentCalendar => (
                state.content_calendar_state,
                state.content_calendar_request.clone(),
            ),
            Track::Campaigns => {
                return Err(RitmoError::State {
                    message: "campaigns track takes campaign events, not track events".into(),
                });
            }
        };

        let (next, next_pending) = machine::apply_track(from, pending.as_ref(), &event)?;

        match track {
            Track::BrandDna => {
                state.brand_dna_state = next;
                state.brand_dna_request = next_pending;
            }
            Track::ContentCalendar => {
                state.content_calendar_state = next;
                state.content_calendar_request = next_pending;
            }
            Track::Campaigns => unreachable!("rejected above"),
        }

        state.version = expected + 1;
        state.last_updated = Utc::now();
        self.store.save(&state, expected).await?;

        tracing::debug!(
            client = %client_id.0,
            track = %track,
            from = %from,
            to = %next,
            event = %event,
            "applied lifecycle transition"
        );

        self.store
            .append(&TransitionRecord {
                client_id: client_id.clone(),
                track,
                from: from.to_string(),
                event: event.to_string(),
                to: next.to_string(),
                request_id: event.request().cloned(),
                recorded_at: state.last_updated,
            })
            .await?;

        Ok(state)
    }

    /// Apply an event to the campaigns track.
    pub async fn apply_campaigns(
        &self,
        client_id: &ClientId,
        event: CampaignsEvent,
    ) -> Result<ClientState, RitmoError> {
        let mut state = self.get_status(client_id).await?;
        let expected = state.version;
        let from = state.campaigns_state;

        let next = machine::campaigns_transition(from, event)?;

        state.campaigns_state = next;
        state.version = expected + 1;
        state.last_updated = Utc::now();
        self.store.save(&state, expected).await?;

        tracing::debug!(
            client = %client_id.0,
            from = %from,
            to = %next,
            event = %event,
            "applied campaigns transition"
        );

        self.store
            .append(&TransitionRecord {
                client_id: client_id.clone(),
                track: Track::Campaigns,
                from: from.to_string(),
                event: event.to_string(),
                to: next.to_string(),
                request_id: None,
                recorded_at: state.last_updated,
            })
            .await?;

        Ok(state)
    }

    /// The transition log for one client, oldest first.
    pub async fn history(&self, client_id: &ClientId) -> Result<Vec<TransitionRecord>, RitmoError> {
        self.store.history(client_id).await
    }

    /// Start a generation: persist `in_progress` with the backend's request
    /// token.
    pub async fn begin_generation(
        &self,
        client_id: &ClientId,
        track: Track,
        request: RequestId,
    ) -> Result<ClientState, RitmoError> {
        self.apply(client_id, track, TrackEvent::Generate { request }).await
    }

    /// The backend confirmed the artifact for `request` exists.
    pub async fn confirm_generation(
        &self,
        client_id: &ClientId,
        track: Track,
        request: RequestId,
    ) -> Result<ClientState, RitmoError> {
        self.apply(client_id, track, TrackEvent::ContentReady { request }).await
    }

    /// The backend reported the generation for `request` failed.
    pub async fn fail_generation(
        &self,
        client_id: &ClientId,
        track: Track,
        request: RequestId,
    ) -> Result<ClientState, RitmoError> {
        self.apply(client_id, track, TrackEvent::Fail { request }).await
    }

    /// Whether a track still has a generation pending. Used by views to
    /// decide between "refresh" and "generate".
    pub fn pending_request(state: &ClientState, track: Track) -> Option<&RequestId> {
        match track {
            Track::BrandDna => state.brand_dna_request.as_ref(),
            Track::ContentCalendar => state.content_calendar_request.as_ref(),
            Track::Campaigns => None,
        }
    }

    /// The state of one generation track.
    pub fn track_state(state: &ClientState, track: Track) -> Option<TrackState> {
        match track {
            Track::BrandDna => Some(state.brand_dna_state),
            Track::ContentCalendar => Some(state.content_calendar_state),
            Track::Campaigns => None,
        }
    }
}
