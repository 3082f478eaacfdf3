// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `content_calendars` table of per-month batch summary rows.

use ritmo_core::{ContentCalendar, NewContentCalendar, RitmoError};

use crate::client::StoreClient;

pub const TABLE: &str = "content_calendars";

pub async fn insert(
    store: &StoreClient,
    calendar: &NewContentCalendar,
) -> Result<ContentCalendar, RitmoError> {
    store.insert(TABLE, calendar).await
}
