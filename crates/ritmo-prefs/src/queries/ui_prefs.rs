// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent UI preferences, stored as key/value pairs.

use ritmo_core::RitmoError;
use rusqlite::params;

use crate::database::Database;

/// Collapse state of the navigation sidebar.
pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";
/// Status filter applied to `approvals list` when none is given.
pub const DEFAULT_APPROVALS_FILTER: &str = "default_approvals_filter";
/// Client filter applied to `calendar` when none is given.
pub const CALENDAR_CLIENT_FILTER: &str = "calendar_client_filter";

/// Every preference key the console knows how to interpret.
pub const KNOWN_KEYS: [&str; 3] = [
    SIDEBAR_COLLAPSED,
    DEFAULT_APPROVALS_FILTER,
    CALENDAR_CLIENT_FILTER,
];

/// Set a preference, overwriting any previous value.
pub async fn set(db: &Database, key: &str, value: &str) -> Result<(), RitmoError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO ui_prefs (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a preference value, or `None` if it was never set.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, RitmoError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM ui_prefs WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| row.get(0));
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every stored preference, sorted by key.
pub async fn all(db: &Database) -> Result<Vec<(String, String)>, RitmoError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM ui_prefs ORDER BY key")?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            let mut prefs = Vec::new();
            for row in rows {
                prefs.push(row?);
            }
            Ok(prefs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
