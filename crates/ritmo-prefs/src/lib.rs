// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local SQLite persistence for the Ritmo console.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed query modules for UI
//! preferences and the cached org settings.

pub mod database;
pub mod migrations;
pub mod queries;

pub use database::Database;
