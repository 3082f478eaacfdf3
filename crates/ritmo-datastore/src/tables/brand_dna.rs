// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `brand_dna` table. Reads only: the artifact is produced and updated
//! by the backend, the console just displays it when the gateway is down.

use ritmo_core::{BrandDna, ClientId, RitmoError};

use crate::client::StoreClient;

pub const TABLE: &str = "brand_dna";

pub async fn get(store: &StoreClient, id: &ClientId) -> Result<Option<BrandDna>, RitmoError> {
    store
        .select_one(TABLE, &format!("select=*&client_id=eq.{}", id.0))
        .await
}
