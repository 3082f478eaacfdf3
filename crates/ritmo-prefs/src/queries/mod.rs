// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each accepts `&Database` and runs on the single
//! writer thread via `connection().call()`.

pub mod settings_cache;
pub mod ui_prefs;
