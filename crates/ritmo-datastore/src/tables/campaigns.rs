// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `campaigns` table.

use ritmo_core::{Campaign, ClientId, NewCampaign, RitmoError};

use crate::client::StoreClient;

pub const TABLE: &str = "campaigns";

/// Looks up a campaign by its idempotency key. Launch calls this before
/// inserting so a re-run returns the existing campaign instead of a
/// duplicate.
pub async fn find_by_idempotency_key(
    store: &StoreClient,
    key: &str,
) -> Result<Option<Campaign>, RitmoError> {
    store
        .select_one(TABLE, &format!("select=*&idempotency_key=eq.{key}"))
        .await
}

pub async fn insert(store: &StoreClient, campaign: &NewCampaign) -> Result<Campaign, RitmoError> {
    store.insert(TABLE, campaign).await
}

pub async fn count_for_client(store: &StoreClient, id: &ClientId) -> Result<usize, RitmoError> {
    let rows: Vec<serde_json::Value> = store
        .select(TABLE, &format!("select=id&client_id=eq.{}", id.0))
        .await?;
    Ok(rows.len())
}
