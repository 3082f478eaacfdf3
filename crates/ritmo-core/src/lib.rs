// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Ritmo marketing-operations console.
//!
//! This crate provides the shared error type, identifiers, status
//! vocabularies, and domain entities used throughout the Ritmo workspace.
//! It has no opinion about where data lives; the gateway and datastore
//! crates move these types over the wire.

pub mod entities;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RitmoError;
pub use types::{
    ApprovalDecision, ApprovalStatus, CampaignId, CampaignStatus, CampaignsState, ClientId,
    ClientState, ClientStatus, Platform, PostId, PostStatus, Priority, RequestId, Track,
    TrackState,
};

pub use entities::{
    Approval, ApprovalSummary, BrandDna, CalendarStatus, Campaign, Client, ContentCalendar,
    NewApproval, NewCampaign, NewClient, NewContentCalendar, NewScheduledPost, ScheduledPost,
    Specialist,
};
