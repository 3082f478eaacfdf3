// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST gateway client for the ops backend.
//!
//! The backend fronts the actual marketing bots. This crate wraps its HTTP
//! surface: health, clients, brand DNA generation and review, campaigns,
//! the content calendar, approvals, and the dashboard summary.

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use types::{
    DashboardSummary, DecideRequest, GenerationStarted, HealthResponse, ValidationReport,
};
