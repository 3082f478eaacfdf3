// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `approval_queue` table.

use chrono::Utc;
use ritmo_core::{Approval, ApprovalDecision, ApprovalStatus, NewApproval, RequestId, RitmoError};

use crate::client::StoreClient;

pub const TABLE: &str = "approval_queue";

pub async fn insert(store: &StoreClient, approval: &NewApproval) -> Result<Approval, RitmoError> {
    store.insert(TABLE, approval).await
}

/// Writes the operator's verdict onto the row.
///
/// The default (`expected_version: None`) is last write wins: the patch
/// touches `status`, `comments`, `decided_by` and `decided_at` and nothing
/// else, so re-deciding an already-decided item simply overwrites the
/// verdict. Pass `Some(version)` to make the write conditional; a mismatch
/// surfaces as [`RitmoError::Conflict`].
pub async fn decide(
    store: &StoreClient,
    request_id: &RequestId,
    decision: ApprovalDecision,
    comments: &str,
    decided_by: &str,
    expected_version: Option<i64>,
) -> Result<Approval, RitmoError> {
    let mut body = serde_json::json!({
        "status": ApprovalStatus::from(decision),
        "comments": comments,
        "decided_by": decided_by,
        "decided_at": Utc::now(),
    });

    match expected_version {
        Some(version) => {
            body["version"] = serde_json::json!(version + 1);
            store.update_checked(TABLE, "request_id", &request_id.0, version, &body).await
        }
        None => {
            let rows: Vec<Approval> = store
                .update(TABLE, &format!("request_id=eq.{}", request_id.0), &body)
                .await?;
            rows.into_iter().next().ok_or_else(|| RitmoError::NotFound {
                entity: "approval".into(),
                id: request_id.0.clone(),
            })
        }
    }
}
