// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persistence seam for lifecycle state.
//!
//! The tracker talks to a [`StateStore`]; the hosted-store implementation
//! lives in `ritmo-datastore`, and [`InMemoryStateStore`] backs tests and
//! offline use.

use std::collections::HashMap;

use async_trait::async_trait;
use ritmo_core::{ClientId, ClientState, RitmoError};
use tokio::sync::Mutex;

use crate::log::TransitionRecord;

/// Where lifecycle rows and their transition log live.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Fetch the stored row, `None` when the client has none yet.
    async fn load(&self, client_id: &ClientId) -> Result<Option<ClientState>, RitmoError>;

    /// Persist the row. `expected_version` is the version the row held when
    /// it was read (0 for a client with no row yet); a mismatch means
    /// someone else wrote in between and must surface as
    /// [`RitmoError::Conflict`], leaving the stored row untouched.
    async fn save(&self, state: &ClientState, expected_version: i64) -> Result<(), RitmoError>;

    /// Append one record to the transition log.
    async fn append(&self, record: &TransitionRecord) -> Result<(), RitmoError>;

    /// The transition log for one client, oldest first.
    async fn history(&self, client_id: &ClientId) -> Result<Vec<TransitionRecord>, RitmoError>;
}

/// In-memory [`StateStore`] with the same version-check semantics as the
/// hosted one.
#[derive(Default)]
pub struct InMemoryStateStore {
    rows: Mutex<HashMap<String, ClientState>>,
    log: Mutex<Vec<TransitionRecord>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self, client_id: &ClientId) -> Result<Option<ClientState>, RitmoError> {
        Ok(self.rows.lock().await.get(&client_id.0).cloned())
    }

    async fn save(&self, state: &ClientState, expected_version: i64) -> Result<(), RitmoError> {
        let mut rows = self.rows.lock().await;
        let current_version = rows.get(&state.client_id.0).map(|row| row.version).unwrap_or(0);
        if current_version != expected_version {
            return Err(RitmoError::Conflict {
                table: "client_state".into(),
                id: state.client_id.0.clone(),
            });
        }
        rows.insert(state.client_id.0.clone(), state.clone());
        Ok(())
    }

    async fn append(&self, record: &TransitionRecord) -> Result<(), RitmoError> {
        self.log.lock().await.push(record.clone());
        Ok(())
    }

    async fn history(&self, client_id: &ClientId) -> Result<Vec<TransitionRecord>, RitmoError> {
        Ok(self
            .log
            .lock()
            .await
            .iter()
            .filter(|record| record.client_id == *client_id)
            .cloned()
            .collect())
    }
}
