// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client lifecycle status model.
//!
//! Each client moves along three tracks: brand DNA, content calendar, and
//! campaigns. This crate owns the legal-move tables, the pending-request
//! token rules, the append-only transition log, and the [`StatusTracker`]
//! that applies events over a [`StateStore`].
//!
//! Two properties hold everywhere:
//!
//! - an illegal move is rejected before anything is written, and
//! - a client with no stored row reads as the default triple
//!   (`not_started`, `not_started`, `inactive`) rather than an error.

pub mod log;
pub mod machine;
pub mod store;
pub mod tracker;

pub use log::TransitionRecord;
pub use machine::{
    CampaignsEvent, TrackEvent, TransitionError, apply_track, campaigns_transition,
    track_transition,
};
pub use store::{InMemoryStateStore, StateStore};
pub use tracker::StatusTracker;
