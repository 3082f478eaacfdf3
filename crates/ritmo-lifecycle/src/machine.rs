// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The legal-move tables for the lifecycle tracks.
//!
//! Transitions are pure functions: they take the current state (and, for the
//! generation tracks, the pending request token) and either return the next
//! state or reject the move. Nothing here touches storage; callers persist
//! the result only after the move is accepted.

use ritmo_core::{CampaignsState, RequestId, TrackState};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Events on the generation tracks (brand DNA, content calendar).
///
/// `Generate` carries the request id the backend issued for the run;
/// `ContentReady` and `Fail` must quote it back. A confirmation arriving for
/// a run that is no longer pending is stale and gets rejected instead of
/// clobbering newer state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum TrackEvent {
    Generate { request: RequestId },
    ContentReady { request: RequestId },
    Fail { request: RequestId },
    Validate,
    Approve,
    Reject,
}

impl TrackEvent {
    /// The request token the event carries, if any.
    pub fn request(&self) -> Option<&RequestId> {
        match self {
            TrackEvent::Generate { request }
            | TrackEvent::ContentReady { request }
            | TrackEvent::Fail { request } => Some(request),
            _ => None,
        }
    }
}

/// Events on the campaigns track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignsEvent {
    Activate,
    Pause,
    Resume,
    Abort,
}

/// A rejected move. The write never happens; the caller decides whether to
/// surface the error or re-read and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// No row in the legal-move table for this (state, event) pair.
    #[error("cannot {event} from {from}")]
    Illegal { from: String, event: String },

    /// A confirmation or failure quoted a token that is not the pending one.
    #[error("stale request token {quoted}: pending is {pending:?}")]
    StaleToken {
        quoted: String,
        pending: Option<String>,
    },
}

impl TransitionError {
    fn illegal(from: impl ToString, event: impl ToString) -> Self {
        TransitionError::Illegal {
            from: from.to_string(),
            event: event.to_string(),
        }
    }
}

impl From<TransitionError> for ritmo_core::RitmoError {
    fn from(err: TransitionError) -> Self {
        ritmo_core::RitmoError::State {
            message: err.to_string(),
        }
    }
}

/// The legal-move table for a generation track, ignoring tokens.
///
/// `approved` is terminal. `rejected` and `failed` re-enter via `generate`.
pub fn track_transition(
    current: TrackState,
    event: &TrackEvent,
) -> Result<TrackState, TransitionError> {
    use TrackEvent::*;
    use TrackState::*;

    match (current, event) {
        (NotStarted | Rejected | Failed, Generate { .. }) => Ok(InProgress),
        (InProgress, ContentReady { .. }) => Ok(Generated),
        (InProgress, Fail { .. }) => Ok(Failed),
        (Generated, Validate) => Ok(Validated),
        (Generated | Validated, Reject) => Ok(Rejected),
        (Validated, Approve) => Ok(Approved),
        _ => Err(TransitionError::illegal(current, event)),
    }
}

/// Apply an event to a generation track, enforcing both the legal-move table
/// and the pending-token check.
///
/// Returns the next state and the token to persist with it. The token is set
/// on entering `in_progress` and cleared on leaving it; every other state
/// carries no token.
pub fn apply_track(
    current: TrackState,
    pending: Option<&RequestId>,
    event: &TrackEvent,
) -> Result<(TrackState, Option<RequestId>), TransitionError> {
    let next = track_transition(current, event)?;

    match event {
        TrackEvent::Generate { request } => Ok((next, Some(request.clone()))),
        TrackEvent::ContentReady { request } | TrackEvent::Fail { request } => match pending {
            Some(token) if token == request => Ok((next, None)),
            _ => Err(TransitionError::StaleToken {
                quoted: request.0.clone(),
                pending: pending.map(|token| token.0.clone()),
            }),
        },
        _ => Ok((next, None)),
    }
}

/// The legal-move table for the campaigns track.
///
/// `aborted` can be restarted with `activate`, mirroring how `rejected`
/// generation tracks re-enter via `generate`.
pub fn campaigns_transition(
    current: CampaignsState,
    event: CampaignsEvent,
) -> Result<CampaignsState, TransitionError> {
    use CampaignsEvent::*;
    use CampaignsState::*;

    match (current, event) {
        (Inactive | Aborted, Activate) => Ok(Active),
        (Active, Pause) => Ok(Paused),
        (Paused, Resume) => Ok(Active),
        (Active | Paused, Abort) => Ok(Aborted),
        _ => Err(TransitionError::illegal(current, event)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> RequestId {
        RequestId(value.to_string())
    }

    #[test]
    fn generation_happy_path() {
        let request = token("req-1");
        let (state, pending) =
            apply_track(TrackState::NotStarted, None, &TrackEvent::Generate { request: request.clone() })
                .expect("generate from not_started");
        assert_eq!(state, TrackState::InProgress);
        assert_eq!(pending, Some(request.clone()));

        let (state, pending) = apply_track(
            state,
            pending.as_ref(),
            &TrackEvent::ContentReady { request },
        )
        .expect("content_ready from in_progress");
        assert_eq!(state, TrackState::Generated);
        assert_eq!(pending, None);

        let (state, _) =
            apply_track(state, None, &TrackEvent::Validate).expect("validate from generated");
        assert_eq!(state, TrackState::Validated);

        let (state, _) =
            apply_track(state, None, &TrackEvent::Approve).expect("approve from validated");
        assert_eq!(state, TrackState::Approved);
    }

    #[test]
    fn approved_is_terminal() {
        for event in [
            TrackEvent::Generate { request: token("r") },
            TrackEvent::ContentReady { request: token("r") },
            TrackEvent::Fail { request: token("r") },
            TrackEvent::Validate,
            TrackEvent::Approve,
            TrackEvent::Reject,
        ] {
            let result = apply_track(TrackState::Approved, None, &event);
            assert!(result.is_err(), "approved must reject {event}");
        }
    }

    #[test]
    fn rejected_and_failed_reenter_via_generate() {
        for from in [TrackState::Rejected, TrackState::Failed] {
            let (state, pending) =
                apply_track(from, None, &TrackEvent::Generate { request: token("retry") })
                    .expect("generate should re-enter");
            assert_eq!(state, TrackState::InProgress);
            assert_eq!(pending, Some(token("retry")));
        }
    }

    #[test]
    fn reject_allowed_from_generated_and_validated_only() {
        assert!(track_transition(TrackState::Generated, &TrackEvent::Reject).is_ok());
        assert!(track_transition(TrackState::Validated, &TrackEvent::Reject).is_ok());
        assert!(track_transition(TrackState::NotStarted, &TrackEvent::Reject).is_err());
        assert!(track_transition(TrackState::InProgress, &TrackEvent::Reject).is_err());
    }

    #[test]
    fn approve_requires_validated() {
        let err = track_transition(TrackState::Generated, &TrackEvent::Approve)
            .expect_err("approve from generated must fail");
        assert_eq!(
            err,
            TransitionError::Illegal {
                from: "generated".into(),
                event: "approve".into()
            }
        );
    }

    #[test]
    fn confirmation_with_wrong_token_is_stale() {
        let result = apply_track(
            TrackState::InProgress,
            Some(&token("req-current")),
            &TrackEvent::ContentReady { request: token("req-old") },
        );
        assert_eq!(
            result,
            Err(TransitionError::StaleToken {
                quoted: "req-old".into(),
                pending: Some("req-current".into()),
            })
        );
    }

    #[test]
    fn failure_without_pending_token_is_stale() {
        // A legacy row can sit at in_progress with no token; nothing may
        // confirm or fail it until a fresh generate installs one.
        let result = apply_track(
            TrackState::InProgress,
            None,
            &TrackEvent::Fail { request: token("req-1") },
        );
        assert!(matches!(result, Err(TransitionError::StaleToken { .. })));
    }

    #[test]
    fn fail_only_applies_while_pending() {
        for from in [
            TrackState::NotStarted,
            TrackState::Generated,
            TrackState::Validated,
            TrackState::Rejected,
            TrackState::Failed,
        ] {
            assert!(
                track_transition(from, &TrackEvent::Fail { request: token("r") }).is_err(),
                "fail must be illegal from {from}"
            );
        }
    }

    #[test]
    fn campaigns_track_moves() {
        use CampaignsEvent::*;
        use CampaignsState::*;

        assert_eq!(campaigns_transition(Inactive, Activate), Ok(Active));
        assert_eq!(campaigns_transition(Active, Pause), Ok(Paused));
        assert_eq!(campaigns_transition(Paused, Resume), Ok(Active));
        assert_eq!(campaigns_transition(Active, Abort), Ok(Aborted));
        assert_eq!(campaigns_transition(Paused, Abort), Ok(Aborted));
        assert_eq!(campaigns_transition(Aborted, Activate), Ok(Active));

        assert!(campaigns_transition(Inactive, Pause).is_err());
        assert!(campaigns_transition(Inactive, Abort).is_err());
        assert!(campaigns_transition(Aborted, Resume).is_err());
    }

    #[test]
    fn event_names_render_snake_case() {
        assert_eq!(TrackEvent::Generate { request: token("r") }.to_string(), "generate");
        assert_eq!(
            TrackEvent::ContentReady { request: token("r") }.to_string(),
            "content_ready"
        );
        assert_eq!(CampaignsEvent::Activate.to_string(), "activate");
    }
}
