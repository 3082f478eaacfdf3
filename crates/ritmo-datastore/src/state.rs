// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`StateStore`] over the hosted store's `client_state` and
//! `client_state_events` tables.

use async_trait::async_trait;
use ritmo_core::{ClientId, ClientState, RitmoError};
use ritmo_lifecycle::{StateStore, TransitionRecord};

use crate::client::StoreClient;

pub const STATE_TABLE: &str = "client_state";
pub const EVENTS_TABLE: &str = "client_state_events";

/// Lifecycle rows and their transition log, kept in the hosted store.
#[derive(Debug, Clone)]
pub struct RemoteStateStore {
    store: StoreClient,
}

impl RemoteStateStore {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StateStore for RemoteStateStore {
    async fn load(&self, client_id: &ClientId) -> Result<Option<ClientState>, RitmoError> {
        self.store
            .select_one(STATE_TABLE, &format!("select=*&client_id=eq.{}", client_id.0))
            .await
    }

    async fn save(&self, state: &ClientState, expected_version: i64) -> Result<(), RitmoError> {
        if expected_version == 0 {
            // No row was read, so this is a first write. A duplicate-key
            // rejection means another writer got there first.
            match self.store.insert::<_, ClientState>(STATE_TABLE, state).await {
                Ok(_) => Ok(()),
                Err(RitmoError::Store { status: Some(409), .. }) => Err(RitmoError::Conflict {
                    table: STATE_TABLE.into(),
                    id: state.client_id.0.clone(),
                }),
                Err(e) => Err(e),
            }
        } else {
            let _: ClientState = self
                .store
                .update_checked(STATE_TABLE, "client_id", &state.client_id.0, expected_version, state)
                .await?;
            Ok(())
        }
    }

    async fn append(&self, record: &TransitionRecord) -> Result<(), RitmoError> {
        let _: TransitionRecord = self.store.insert(EVENTS_TABLE, record).await?;
        Ok(())
    }

    async fn history(&self, client_id: &ClientId) -> Result<Vec<TransitionRecord>, RitmoError> {
        self.store
            .select(
                EVENTS_TABLE,
                &format!("select=*&client_id=eq.{}&order=recorded_at.asc", client_id.0),
            )
            .await
    }
}
