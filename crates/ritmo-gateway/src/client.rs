// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the ops backend's REST gateway.
//!
//! Provides [`GatewayClient`], which owns request construction, headers,
//! timeouts, and error-body parsing for every gateway endpoint the console
//! consumes.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use ritmo_config::model::GatewayConfig;
use ritmo_core::{
    Approval, ApprovalStatus, BrandDna, Campaign, Client, ClientId, ClientState, RitmoError,
    ScheduledPost, Specialist,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{
    ApiErrorBody, ApprovalsEnvelope, CampaignsEnvelope, ClientsEnvelope, DashboardSummary,
    DecideRequest, GenerationStarted, HealthResponse, PostsEnvelope, SpecialistsEnvelope,
    ValidationReport,
};

/// HTTP client for gateway communication.
///
/// Failures surface immediately: there is no retry, no backoff, and no
/// circuit breaking. The operator re-runs the command if the backend was
/// having a moment.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a new gateway client from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, RitmoError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RitmoError::Gateway {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RitmoError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        read_json(path, response).await
    }

    /// Like [`get_json`], but a 404 means "not there yet" rather than an
    /// error.
    async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, RitmoError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(path, response).await.map(Some)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RitmoError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(path, response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, RitmoError> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        read_json(path, response).await
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, RitmoError> {
        self.get_json("/api/health").await
    }

    /// `GET /api/clients`.
    pub async fn list_clients(&self) -> Result<Vec<Client>, RitmoError> {
        let envelope: ClientsEnvelope = self.get_json("/api/clients").await?;
        Ok(envelope.clients)
    }

    /// `GET /api/client/{id}/state`. `None` when the backend has no state
    /// row for the client.
    pub async fn client_state(&self, id: &ClientId) -> Result<Option<ClientState>, RitmoError> {
        self.get_json_opt(&format!("/api/client/{}/state", id.0)).await
    }

    /// `POST /api/client/{id}/initialize`: create the default state row.
    pub async fn initialize_client(&self, id: &ClientId) -> Result<ClientState, RitmoError> {
        self.post_empty(&format!("/api/client/{}/initialize", id.0)).await
    }

    /// `POST /api/generate-brand-dna`: kick off a generation, returning the
    /// request id to track it by.
    pub async fn generate_brand_dna(
        &self,
        client_id: &ClientId,
    ) -> Result<GenerationStarted, RitmoError> {
        self.post_json(
            "/api/generate-brand-dna",
            &serde_json::json!({ "client_id": client_id.0 }),
        )
        .await
    }

    /// `GET /api/brand-dna/{client_id}`. `None` until a generation lands.
    pub async fn brand_dna(&self, client_id: &ClientId) -> Result<Option<BrandDna>, RitmoError> {
        self.get_json_opt(&format!("/api/brand-dna/{}", client_id.0)).await
    }

    /// `POST /api/brand-dna/{client_id}/validate`.
    pub async fn validate_brand_dna(
        &self,
        client_id: &ClientId,
    ) -> Result<ValidationReport, RitmoError> {
        self.post_empty(&format!("/api/brand-dna/{}/validate", client_id.0)).await
    }

    /// `POST /api/brand-dna/{client_id}/approve`.
    pub async fn approve_brand_dna(&self, client_id: &ClientId) -> Result<BrandDna, RitmoError> {
        self.post_empty(&format!("/api/brand-dna/{}/approve", client_id.0)).await
    }

    /// `GET /api/campaigns`, optionally filtered to one client.
    pub async fn campaigns(
        &self,
        client_id: Option<&ClientId>,
    ) -> Result<Vec<Campaign>, RitmoError> {
        let path = match client_id {
            Some(id) => format!("/api/campaigns?client_id={}", id.0),
            None => "/api/campaigns".to_string(),
        };
        let envelope: CampaignsEnvelope = self.get_json(&path).await?;
        Ok(envelope.campaigns)
    }

    /// `GET /api/approvals`, optionally filtered by status.
    pub async fn approvals(
        &self,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<Approval>, RitmoError> {
        let path = match status {
            Some(status) => format!("/api/approvals?status={status}"),
            None => "/api/approvals".to_string(),
        };
        let envelope: ApprovalsEnvelope = self.get_json(&path).await?;
        Ok(envelope.approvals)
    }

    /// `POST /api/approvals/{id}/decide`: record the operator's verdict and
    /// return the updated item.
    pub async fn decide_approval(
        &self,
        request_id: &ritmo_core::RequestId,
        decide: &DecideRequest,
    ) -> Result<Approval, RitmoError> {
        self.post_json(&format!("/api/approvals/{}/decide", request_id.0), decide)
            .await
    }

    /// `GET /api/calendar`, optionally filtered to one client.
    pub async fn calendar(
        &self,
        client_id: Option<&ClientId>,
    ) -> Result<Vec<ScheduledPost>, RitmoError> {
        let path = match client_id {
            Some(id) => format!("/api/calendar?client_id={}", id.0),
            None => "/api/calendar".to_string(),
        };
        let envelope: PostsEnvelope = self.get_json(&path).await?;
        Ok(envelope.posts)
    }

    /// `POST /api/generate-content-calendar`: kick off a month's batch.
    pub async fn generate_content_calendar(
        &self,
        client_id: &ClientId,
        month: &str,
    ) -> Result<GenerationStarted, RitmoError> {
        self.post_json(
            "/api/generate-content-calendar",
            &serde_json::json!({ "client_id": client_id.0, "month": month }),
        )
        .await
    }

    /// `GET /api/specialists`.
    pub async fn specialists(&self) -> Result<Vec<Specialist>, RitmoError> {
        let envelope: SpecialistsEnvelope = self.get_json("/api/specialists").await?;
        Ok(envelope.specialists)
    }

    /// `GET /api/dashboard/summary`.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, RitmoError> {
        self.get_json("/api/dashboard/summary").await
    }
}

async fn read_json<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, RitmoError> {
    let status = response.status();
    debug!(status = %status, path, "gateway response received");

    if status.is_success() {
        let body = response.text().await.map_err(|e| RitmoError::Gateway {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| RitmoError::Gateway {
            status: Some(status.as_u16()),
            message: format!("failed to parse response from {path}: {e}"),
            source: Some(Box::new(e)),
        })
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// Shape a non-2xx response into a gateway error, preferring the backend's
/// own `detail` message when the body carries one.
fn api_error(status: StatusCode, body: &str) -> RitmoError {
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
        format!("backend rejected the request ({}): {}", status.as_u16(), api_err.detail)
    } else {
        format!("backend returned {status}: {body}")
    };
    RitmoError::Gateway {
        status: Some(status.as_u16()),
        message,
        source: None,
    }
}

fn transport_error(e: reqwest::Error) -> RitmoError {
    RitmoError::Gateway {
        status: None,
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use ritmo_core::{ApprovalDecision, RequestId};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> GatewayClient {
        GatewayClient::new(&GatewayConfig::default())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn client_row(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "industry": "Tecnología / Software",
            "status": "active",
            "created_at": "2026-02-10T09:00:00Z",
            "updated_at": "2026-02-10T09:00:00Z"
        })
    }

    #[tokio::test]
    async fn health_reports_backend_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "uptime_secs": 4242
            })))
            .mount(&server)
            .await;

        let health = test_client(&server.uri()).health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.uptime_secs, Some(4242));
    }

    #[tokio::test]
    async fn list_clients_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clients": [client_row("c1", "Cafetería Luna"), client_row("c2", "Estudio Nube")]
            })))
            .mount(&server)
            .await;

        let clients = test_client(&server.uri()).list_clients().await.unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Cafetería Luna");
    }

    #[tokio::test]
    async fn missing_envelope_key_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let clients = test_client(&server.uri()).list_clients().await.unwrap();
        assert!(clients.is_empty());
    }

    #[tokio::test]
    async fn missing_state_row_reads_as_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/client/ghost/state"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": "Client not found"
            })))
            .mount(&server)
            .await;

        let state = test_client(&server.uri())
            .client_state(&ClientId("ghost".into()))
            .await
            .unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn generate_brand_dna_posts_the_client_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-brand-dna"))
            .and(body_json(serde_json::json!({ "client_id": "c1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-77",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let started = test_client(&server.uri())
            .generate_brand_dna(&ClientId("c1".into()))
            .await
            .unwrap();
        assert_eq!(started.request_id, RequestId("req-77".into()));
        assert_eq!(started.status.as_deref(), Some("queued"));
    }

    #[tokio::test]
    async fn approvals_filter_lands_in_the_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/approvals"))
            .and(query_param("status", "pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "approvals": [{
                    "request_id": "req-1",
                    "client_id": "c1",
                    "bot": "brand-architect",
                    "priority": "p1",
                    "status": "pending",
                    "summary": "Aprobar plan Q2",
                    "submitted_at": "2026-03-01T08:00:00Z"
                }]
            })))
            .mount(&server)
            .await;

        let approvals = test_client(&server.uri())
            .approvals(Some(ApprovalStatus::Pending))
            .await
            .unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].summary.title(), "Aprobar plan Q2");
    }

    #[tokio::test]
    async fn decide_sends_verdict_and_returns_updated_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/approvals/req-1/decide"))
            .and(body_json(serde_json::json!({
                "decision": "approved",
                "comments": "Aprobado",
                "decided_by": "Director"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-1",
                "client_id": "c1",
                "bot": "brand-architect",
                "priority": "p1",
                "status": "approved",
                "summary": "Aprobar plan Q2",
                "submitted_at": "2026-03-01T08:00:00Z",
                "decided_at": "2026-03-01T09:30:00Z",
                "decided_by": "Director",
                "comments": "Aprobado"
            })))
            .mount(&server)
            .await;

        let updated = test_client(&server.uri())
            .decide_approval(
                &RequestId("req-1".into()),
                &DecideRequest {
                    decision: ApprovalDecision::Approved,
                    comments: "Aprobado".into(),
                    decided_by: "Director".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ApprovalStatus::Approved);
        assert_eq!(updated.decided_by.as_deref(), Some("Director"));
    }

    #[tokio::test]
    async fn error_bodies_surface_the_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-brand-dna"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "client has no brief"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_brand_dna(&ClientId("c1".into()))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("client has no brief"), "got: {msg}");
        assert!(matches!(err, RitmoError::Gateway { status: Some(400), .. }));
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;
        // expect(1) fails the test if the client tries the call twice.
        Mock::given(method("GET"))
            .and(path("/api/clients"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_clients().await.unwrap_err();
        assert!(matches!(err, RitmoError::Gateway { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn calendar_filters_by_client() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calendar"))
            .and(query_param("client_id", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": [{
                    "id": "p1",
                    "client_id": "c1",
                    "content": "Lanzamiento de primavera",
                    "platform": "instagram",
                    "scheduled_date": "2026-03-02",
                    "status": "draft",
                    "created_at": "2026-03-01T08:00:00Z"
                }]
            })))
            .mount(&server)
            .await;

        let posts = test_client(&server.uri())
            .calendar(Some(&ClientId("c1".into())))
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].scheduled_date.to_string(), "2026-03-02");
    }
}
