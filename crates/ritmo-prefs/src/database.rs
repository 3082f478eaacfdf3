// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management for the local preferences store.
//!
//! `Database` wraps a single `tokio_rusqlite::Connection`. All query modules
//! accept `&Database` and go through `connection().call()`, which serializes
//! every closure on one background thread. Do NOT create additional
//! Connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::debug;

use ritmo_config::model::PrefsConfig;
use ritmo_core::RitmoError;

use crate::migrations::run_migrations;

/// Handle to the local preferences database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, in WAL mode, and run any
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, RitmoError> {
        Self::open_inner(path, true).await
    }

    /// Open the database described by the `[prefs]` section of the config.
    pub async fn open_with(config: &PrefsConfig) -> Result<Self, RitmoError> {
        Self::open_inner(&config.database_path, config.wal_mode).await
    }

    async fn open_inner(path: &str, wal_mode: bool) -> Result<Self, RitmoError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RitmoError::Prefs {
                    source: Box::new(e),
                })?;
            }
        }

        // Migrations and the persistent journal-mode switch run on a short-lived
        // blocking connection before the async handle exists.
        let setup_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), RitmoError> {
            let mut conn =
                rusqlite::Connection::open(&setup_path).map_err(|e| RitmoError::Prefs {
                    source: Box::new(e),
                })?;
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")
                    .map_err(|e| RitmoError::Prefs {
                        source: Box::new(e),
                    })?;
            }
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| RitmoError::Prefs {
            source: Box::new(e),
        })??;

        // `Connection::open` surfaces a plain rusqlite error, not the
        // wrapper's, so it gets its own mapping.
        let conn = Connection::open(path).await.map_err(|e| RitmoError::Prefs {
            source: Box::new(e),
        })?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.pragma_update(None, "busy_timeout", 5000)?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path, "preferences database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying connection handle for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), RitmoError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("preferences database closed");
        Ok(())
    }
}

/// Map a `tokio_rusqlite` error into the shared error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> RitmoError {
    RitmoError::Prefs {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("deeper").join("prefs.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let mode = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode, "wal");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_the_prefs_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("prefs.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let tables = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok(names)
            })
            .await
            .unwrap();
        assert!(tables.contains(&"ui_prefs".to_string()));
        assert!(tables.contains(&"settings_cache".to_string()));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn opening_a_directory_path_is_a_prefs_error() {
        let dir = tempdir().unwrap();
        let err = Database::open(dir.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, RitmoError::Prefs { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn open_with_honors_wal_mode_off() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("prefs.db");
        let config = PrefsConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: false,
        };
        let db = Database::open_with(&config).await.unwrap();

        let mode = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode, "delete");

        db.close().await.unwrap();
    }
}
