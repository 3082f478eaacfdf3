// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Ritmo marketing-operations console.

use thiserror::Error;

/// The primary error type used across all Ritmo crates.
#[derive(Debug, Error)]
pub enum RitmoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// REST gateway errors (backend rejected the call, or the call never arrived).
    /// `status` is `None` for transport-level failures.
    #[error("gateway error: {message}")]
    Gateway {
        status: Option<u16>,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Hosted relational store errors (query rejected, row shape mismatch, transport).
    /// `status` is `None` for transport-level failures.
    #[error("store error: {message}")]
    Store {
        status: Option<u16>,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Local preferences database errors.
    #[error("preferences error: {source}")]
    Prefs {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A version-checked write matched no rows: someone else updated the
    /// record since it was read. Re-read and retry.
    #[error("conflict: {table} row {id} was modified concurrently")]
    Conflict { table: String, id: String },

    /// A record that was expected to exist does not.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Lifecycle status model violations (illegal transition, stale token).
    #[error("state error: {message}")]
    State { message: String },

    /// A user-supplied value failed a form gate.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
