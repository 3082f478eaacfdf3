// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Ritmo integration tests.
//!
//! The [`TestHarness`] stands up mock gateway and store servers plus a temp
//! prefs database; [`fixtures`] provides canned entities to mount on them.

pub mod fixtures;
pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
