// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `clients` table.

use chrono::Utc;
use ritmo_core::{Client, ClientId, ClientStatus, NewClient, RitmoError};

use crate::client::StoreClient;

pub const TABLE: &str = "clients";

/// Active clients, newest first. `all` drops the status filter and includes
/// paused and archived accounts.
pub async fn list(store: &StoreClient, all: bool) -> Result<Vec<Client>, RitmoError> {
    let query = if all {
        "select=*&order=created_at.desc"
    } else {
        "select=*&status=eq.active&order=created_at.desc"
    };
    store.select(TABLE, query).await
}

pub async fn get(store: &StoreClient, id: &ClientId) -> Result<Client, RitmoError> {
    store
        .select_one(TABLE, &format!("select=*&id=eq.{}", id.0))
        .await?
        .ok_or_else(|| RitmoError::NotFound {
            entity: "client".into(),
            id: id.0.clone(),
        })
}

pub async fn insert(store: &StoreClient, client: &NewClient) -> Result<Client, RitmoError> {
    store.insert(TABLE, client).await
}

/// Version-checked status overwrite.
pub async fn set_status(
    store: &StoreClient,
    id: &ClientId,
    expected_version: i64,
    status: ClientStatus,
) -> Result<Client, RitmoError> {
    let body = serde_json::json!({
        "status": status,
        "updated_at": Utc::now(),
        "version": expected_version + 1,
    });
    store.update_checked(TABLE, "id", &id.0, expected_version, &body).await
}

pub async fn archive(
    store: &StoreClient,
    id: &ClientId,
    expected_version: i64,
) -> Result<Client, RitmoError> {
    set_status(store, id, expected_version, ClientStatus::Archived).await
}

/// Removes the row. Campaigns and posts referencing the client are left
/// alone; the store's own constraints decide what happens to them.
pub async fn delete(store: &StoreClient, id: &ClientId) -> Result<(), RitmoError> {
    store.delete(TABLE, &format!("id=eq.{}", id.0)).await
}
