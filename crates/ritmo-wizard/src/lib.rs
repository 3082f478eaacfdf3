// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-creation wizard.
//!
//! Five ordered steps, each with a gate that must pass before the next one
//! opens. The engine is I/O-free; the console drives it with prompts and
//! inserts the [`ritmo_core::NewClient`] it yields on completion.

pub mod steps;
pub mod wizard;

pub use steps::{INDUSTRIES, WizardStep};
pub use wizard::{Advance, ClientDraft, ClientWizard, IncompleteStep, MIN_BRIEF_CHARS};
