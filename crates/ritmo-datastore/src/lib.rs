// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct access to the hosted relational store.
//!
//! The console reaches this store for what the gateway does not cover:
//! client CRUD, campaign launch artifacts, direct approval decides, and the
//! lifecycle state rows with their transition log. [`StoreClient`] owns the
//! HTTP verbs; [`tables`] adds one typed module per table; and
//! [`RemoteStateStore`] plugs the `client_state` tables into
//! `ritmo-lifecycle`.

pub mod client;
pub mod state;
pub mod tables;

pub use client::StoreClient;
pub use state::RemoteStateStore;
