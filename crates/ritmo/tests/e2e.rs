// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-crate flows driven through the full harness: gateway, store and
//! prefs database together, the way the commands wire them.

use std::sync::Arc;

use ritmo_core::{ApprovalDecision, ApprovalStatus, ClientId, Priority, RequestId, Track, TrackState};
use ritmo_datastore::RemoteStateStore;
use ritmo_gateway::DecideRequest;
use ritmo_lifecycle::StatusTracker;
use ritmo_prefs::queries::{settings_cache, ui_prefs};
use ritmo_test_utils::{TestHarness, fixtures};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, m: &str, p: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(m))
        .and(path(p))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn deciding_an_approval_sends_the_operator_name() {
    let harness = TestHarness::builder()
        .with_operator_name("Valentina")
        .build()
        .await
        .unwrap();

    let mut decided = fixtures::approval("req-1", "cl-1", Priority::P1);
    decided.status = ApprovalStatus::Approved;
    decided.decided_by = Some("Valentina".to_string());

    Mock::given(method("POST"))
        .and(path("/api/approvals/req-1/decide"))
        .and(body_json(serde_json::json!({
            "decision": "approved",
            "comments": "Aprobado",
            "decided_by": "Valentina",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&decided))
        .mount(&harness.gateway_server)
        .await;

    let request = DecideRequest {
        decision: ApprovalDecision::Approved,
        comments: "Aprobado".to_string(),
        decided_by: harness.config.operator.name.clone(),
    };
    let result = harness
        .gateway
        .decide_approval(&RequestId("req-1".to_string()), &request)
        .await
        .unwrap();

    assert_eq!(result.status, ApprovalStatus::Approved);
    assert_eq!(result.decided_by.as_deref(), Some("Valentina"));
}

#[tokio::test]
async fn starting_a_generation_persists_state_and_audit_row() {
    let harness = TestHarness::builder().build().await.unwrap();

    // No state row yet, so the tracker inserts version 1.
    harness.stub_store_get("/rest/v1/client_state", serde_json::json!([])).await;
    mount_json(
        &harness.store_server,
        "POST",
        "/rest/v1/client_state",
        201,
        serde_json::json!([{
            "client_id": "cl-1",
            "brand_dna_state": "in_progress",
            "brand_dna_request": "req-9",
            "content_calendar_state": "not_started",
            "content_calendar_request": null,
            "campaigns_state": "inactive",
            "version": 1,
            "last_updated": "2026-03-01T12:00:00Z",
        }]),
    )
    .await;
    mount_json(
        &harness.store_server,
        "POST",
        "/rest/v1/client_state_events",
        201,
        serde_json::json!([{
            "client_id": "cl-1",
            "track": "brand_dna",
            "from": "not_started",
            "event": "generate",
            "to": "in_progress",
            "request_id": "req-9",
            "recorded_at": "2026-03-01T12:00:00Z",
        }]),
    )
    .await;

    let tracker = StatusTracker::new(Arc::new(RemoteStateStore::new(harness.store.clone())));
    let state = tracker
        .begin_generation(
            &ClientId("cl-1".to_string()),
            Track::BrandDna,
            RequestId("req-9".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(state.brand_dna_state, TrackState::InProgress);
    assert_eq!(state.brand_dna_request.as_ref().map(|r| r.0.as_str()), Some("req-9"));
}

#[tokio::test]
async fn fetched_roster_is_cached_fresh_in_the_prefs_database() {
    let harness = TestHarness::builder().build().await.unwrap();

    harness
        .stub_gateway_get(
            "/api/specialists",
            serde_json::json!({
                "specialists": [fixtures::specialist("sp-1", "Laura", "brand-strategist")],
            }),
        )
        .await;

    let roster = harness.gateway.specialists().await.unwrap();
    assert_eq!(roster.len(), 1);

    let payload = serde_json::to_string(&roster).unwrap();
    settings_cache::put(&harness.prefs, settings_cache::SPECIALISTS, &payload)
        .await
        .unwrap();

    let cached = settings_cache::get(&harness.prefs, settings_cache::SPECIALISTS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached.payload, payload);
    assert!(!settings_cache::is_stale(
        &cached.fetched_at,
        900,
        chrono::Utc::now()
    ));
}

#[tokio::test]
async fn a_saved_filter_preference_drives_the_gateway_query() {
    let harness = TestHarness::builder().build().await.unwrap();

    ui_prefs::set(&harness.prefs, ui_prefs::DEFAULT_APPROVALS_FILTER, "approved")
        .await
        .unwrap();
    let saved = ui_prefs::get(&harness.prefs, ui_prefs::DEFAULT_APPROVALS_FILTER)
        .await
        .unwrap()
        .unwrap();
    let filter: ApprovalStatus = saved.parse().unwrap();
    assert_eq!(filter, ApprovalStatus::Approved);

    let mut item = fixtures::approval("req-2", "cl-1", Priority::P2);
    item.status = ApprovalStatus::Approved;
    Mock::given(method("GET"))
        .and(path("/api/approvals"))
        .and(query_param("status", "approved"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "approvals": [item] })),
        )
        .mount(&harness.gateway_server)
        .await;

    let items = harness.gateway.approvals(Some(filter)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, ApprovalStatus::Approved);
}
