// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poll-and-settle flow shared by the generation tracks.
//!
//! Brand DNA and the content calendar follow the same protocol: `generate`
//! records a pending request token, and a later poll either confirms the
//! track (artifact arrived), fails it (backend rejected the request), or
//! leaves it running. The commands differ only in how they probe for the
//! artifact, so they pass the probe's verdict in here.

use ritmo_core::{ClientId, ClientState, RitmoError, Track, TrackState};
use ritmo_lifecycle::StatusTracker;

/// What one poll concluded and settled.
#[derive(Debug, PartialEq)]
pub enum RefreshOutcome {
    /// The artifact landed; the track was confirmed.
    Confirmed(ClientState),
    /// The backend rejected the generation; the track was failed.
    Failed(ClientState),
    /// Generation pending, artifact not there yet.
    StillRunning,
    /// The artifact exists and no generation is pending.
    AlreadySettled(ClientState),
    /// No artifact and nothing pending either.
    NothingPending(ClientState),
}

/// Settles `track` from the caller's artifact probe. `Ok(true)` means the
/// backend has the artifact, `Ok(false)` that it does not yet. The pending
/// token from the state row is what authorizes the settlement; without a
/// pending generation this only reports.
pub async fn settle(
    tracker: &StatusTracker,
    id: &ClientId,
    track: Track,
    artifact: Result<bool, RitmoError>,
) -> Result<RefreshOutcome, RitmoError> {
    let state = tracker.get_status(id).await?;
    let track_state = StatusTracker::track_state(&state, track);
    let pending = StatusTracker::pending_request(&state, track).cloned();

    match artifact {
        Ok(true) => match (track_state, pending) {
            (Some(TrackState::InProgress), Some(request)) => {
                let state = tracker.confirm_generation(id, track, request).await?;
                Ok(RefreshOutcome::Confirmed(state))
            }
            _ => Ok(RefreshOutcome::AlreadySettled(state)),
        },
        Ok(false) => match (track_state, pending) {
            (Some(TrackState::InProgress), Some(_)) => Ok(RefreshOutcome::StillRunning),
            _ => Ok(RefreshOutcome::NothingPending(state)),
        },
        // A client error from the backend settles a pending generation as
        // failed; without one it is the caller's problem.
        Err(RitmoError::Gateway { status: Some(status), message, source })
            if (400..500).contains(&status) =>
        {
            match (track_state, pending) {
                (Some(TrackState::InProgress), Some(request)) => {
                    let state = tracker.fail_generation(id, track, request).await?;
                    Ok(RefreshOutcome::Failed(state))
                }
                _ => Err(RitmoError::Gateway { status: Some(status), message, source }),
            }
        }
        Err(e) => Err(e),
    }
}
