// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `posts` table.

use ritmo_core::{ClientId, NewScheduledPost, RitmoError, ScheduledPost};

use crate::client::StoreClient;

pub const TABLE: &str = "posts";

/// Inserts a whole batch in one request; the store returns every persisted
/// row.
pub async fn insert_batch(
    store: &StoreClient,
    posts: &[NewScheduledPost],
) -> Result<Vec<ScheduledPost>, RitmoError> {
    store.insert_rows(TABLE, posts).await
}

pub async fn count_for_client(store: &StoreClient, id: &ClientId) -> Result<usize, RitmoError> {
    let rows: Vec<serde_json::Value> = store
        .select(TABLE, &format!("select=id&client_id=eq.{}", id.0))
        .await?;
    Ok(rows.len())
}
