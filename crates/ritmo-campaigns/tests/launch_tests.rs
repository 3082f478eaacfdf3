// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Launch flow against a mocked store.

use chrono::Utc;
use ritmo_campaigns::{CampaignInput, LaunchOutcome, launch, plan_campaign};
use ritmo_config::model::DatastoreConfig;
use ritmo_core::{CampaignId, ClientId, Platform};
use ritmo_datastore::StoreClient;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> StoreClient {
    let config = DatastoreConfig {
        base_url: server.uri(),
        ..DatastoreConfig::default()
    };
    StoreClient::new(&config).unwrap()
}

fn input() -> CampaignInput {
    CampaignInput {
        client_id: ClientId("c1".into()),
        client_name: "Cafetería Luna".into(),
        name: "Primavera 2026".into(),
        objective: "Más alcance en la zona".into(),
        platforms: vec![Platform::Instagram],
        budget: None,
        start_date: "2026-03-01".parse().unwrap(),
    }
}

fn campaign_row() -> serde_json::Value {
    serde_json::json!({
        "id": "camp-1",
        "client_id": "c1",
        "name": "Primavera 2026",
        "objective": "Más alcance en la zona",
        "platforms": ["instagram"],
        "status": "draft",
        "start_date": "2026-03-01",
        "end_date": "2026-03-26",
        "idempotency_key": "c1:primavera-2026:2026-03-01",
        "created_at": "2026-02-20T10:00:00Z",
        "version": 1
    })
}

fn post_rows(count: usize) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("post-{i}"),
                "client_id": "c1",
                "campaign_id": "camp-1",
                "content": format!("borrador {i}"),
                "platform": "instagram",
                "scheduled_date": "2026-03-02",
                "status": "draft",
                "created_at": "2026-02-20T10:00:00Z"
            })
        })
        .collect();
    serde_json::Value::Array(rows)
}

fn approval_row(request_id: &str, priority: &str) -> serde_json::Value {
    serde_json::json!({
        "request_id": request_id,
        "client_id": "c1",
        "bot": "campaign-planner",
        "priority": priority,
        "status": "pending",
        "summary": { "title": "Aprobar plan de campaña: Primavera 2026" },
        "submitted_at": "2026-02-20T10:00:00Z"
    })
}

#[tokio::test]
async fn launch_persists_every_artifact_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/campaigns"))
        .and(query_param("idempotency_key", "eq.c1:primavera-2026:2026-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/campaigns"))
        .and(body_partial_json(serde_json::json!({
            "idempotency_key": "c1:primavera-2026:2026-03-01",
            "status": "draft"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([campaign_row()])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/posts"))
        .and(body_partial_json(serde_json::json!([
            { "campaign_id": "camp-1", "status": "draft" }
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_rows(8)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/content_calendars"))
        .and(body_partial_json(serde_json::json!({
            "campaign_id": "camp-1",
            "month": "2026-03",
            "post_count": 8
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([{
            "id": "cal-1",
            "client_id": "c1",
            "campaign_id": "camp-1",
            "month": "2026-03",
            "post_count": 8,
            "status": "draft",
            "created_at": "2026-02-20T10:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/approval_queue"))
        .and(body_partial_json(serde_json::json!({ "priority": "p1" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([approval_row("req-plan", "p1")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/approval_queue"))
        .and(body_partial_json(serde_json::json!({ "priority": "p2" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([approval_row("req-batch", "p2")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let plan = plan_campaign(&input(), Utc::now()).unwrap();
    let outcome = launch(&store_for(&server), &plan).await.unwrap();

    match outcome {
        LaunchOutcome::Created(launched) => {
            assert_eq!(launched.campaign.id, CampaignId("camp-1".into()));
            assert_eq!(launched.posts.len(), 8);
            assert_eq!(launched.calendar.month, "2026-03");
            assert_eq!(launched.plan_approval.request_id.0, "req-plan");
            assert_eq!(launched.batch_approval.request_id.0, "req-batch");
        }
        LaunchOutcome::AlreadyExists(_) => panic!("expected a fresh launch"),
    }
}

#[tokio::test]
async fn resubmission_returns_the_existing_campaign_without_writing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/campaigns"))
        .and(query_param("idempotency_key", "eq.c1:primavera-2026:2026-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([campaign_row()])))
        .mount(&server)
        .await;
    // Any write reaching the store fails the test.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let plan = plan_campaign(&input(), Utc::now()).unwrap();
    let outcome = launch(&store_for(&server), &plan).await.unwrap();

    match outcome {
        LaunchOutcome::AlreadyExists(existing) => {
            assert_eq!(existing.id, CampaignId("camp-1".into()));
        }
        LaunchOutcome::Created(_) => panic!("expected the idempotency guard to trip"),
    }
}
