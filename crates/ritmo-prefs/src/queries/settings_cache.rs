// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local cache of org-level payloads fetched from the gateway.
//!
//! Payloads are stored as raw JSON text with a fetch timestamp. Callers
//! decide freshness with [`is_stale`] against the configured TTL, so a dead
//! gateway still leaves `settings show` with something to render.

use chrono::{DateTime, Duration, Utc};
use ritmo_core::RitmoError;
use rusqlite::params;

use crate::database::Database;

/// Cache key for the specialist roster.
pub const SPECIALISTS: &str = "specialists";

/// A cached payload and the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedSettings {
    pub payload: String,
    pub fetched_at: String,
}

/// Store a payload under `key`, stamping it with the current time.
pub async fn put(db: &Database, key: &str, payload: &str) -> Result<(), RitmoError> {
    let key = key.to_string();
    let payload = payload.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO settings_cache (key, payload, fetched_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     payload = excluded.payload,
                     fetched_at = excluded.fetched_at",
                params![key, payload],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch the cached payload under `key`, or `None` if nothing was cached yet.
pub async fn get(db: &Database, key: &str) -> Result<Option<CachedSettings>, RitmoError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT payload, fetched_at FROM settings_cache WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| {
                Ok(CachedSettings {
                    payload: row.get(0)?,
                    fetched_at: row.get(1)?,
                })
            });
            match result {
                Ok(cached) => Ok(Some(cached)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether a cached payload is older than `ttl_secs`.
///
/// An unparseable timestamp counts as stale, so a corrupt row forces a
/// refresh instead of pinning old data forever.
pub fn is_stale(fetched_at: &str, ttl_secs: u64, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(fetched_at) {
        Ok(fetched) => {
            let age = now.signed_duration_since(fetched.with_timezone(&Utc));
            age > Duration::seconds(ttl_secs as i64)
        }
        Err(_) => true,
    }
}
