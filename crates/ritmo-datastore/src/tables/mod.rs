// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations for each table the console touches directly.

pub mod approvals;
pub mod brand_dna;
pub mod calendars;
pub mod campaigns;
pub mod clients;
pub mod posts;
