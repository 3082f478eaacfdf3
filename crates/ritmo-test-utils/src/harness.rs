// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete console stack: one mock server for the
//! REST gateway, one for the hosted store, a temp prefs database, and clients
//! configured to talk to all three. Tests mount wiremock expectations on the
//! servers and drive the real client code against them.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ritmo_config::model::{
    DatastoreConfig, GatewayConfig, OperatorConfig, PrefsConfig, RitmoConfig,
};
use ritmo_core::RitmoError;
use ritmo_datastore::StoreClient;
use ritmo_gateway::GatewayClient;
use ritmo_prefs::Database;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    api_key: Option<String>,
    operator_name: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            api_key: None,
            operator_name: None,
        }
    }

    /// Set a store API key, so tests can assert the auth headers.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Set the operator name recorded on decisions.
    pub fn with_operator_name(mut self, name: &str) -> Self {
        self.operator_name = Some(name.to_string());
        self
    }

    /// Build the test harness, starting both mock servers.
    pub async fn build(self) -> Result<TestHarness, RitmoError> {
        let gateway_server = MockServer::start().await;
        let store_server = MockServer::start().await;

        // Temp directory for the prefs database
        let temp_dir = tempfile::TempDir::new().map_err(|e| RitmoError::Prefs {
            source: e.into(),
        })?;
        let db_path = temp_dir.path().join("prefs.db");
        let prefs_config = PrefsConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let prefs = Database::open_with(&prefs_config).await?;

        let config = RitmoConfig {
            operator: OperatorConfig {
                name: self
                    .operator_name
                    .unwrap_or_else(|| "Director".to_string()),
                ..OperatorConfig::default()
            },
            gateway: GatewayConfig {
                base_url: gateway_server.uri(),
                timeout_secs: 5,
            },
            datastore: DatastoreConfig {
                base_url: store_server.uri(),
                api_key: self.api_key,
                timeout_secs: 5,
            },
            prefs: prefs_config,
            ..RitmoConfig::default()
        };

        let gateway = GatewayClient::new(&config.gateway)?;
        let store = StoreClient::new(&config.datastore)?;

        Ok(TestHarness {
            gateway_server,
            store_server,
            gateway,
            store,
            prefs,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock backends and temp storage.
pub struct TestHarness {
    /// Mock server standing in for the REST gateway.
    pub gateway_server: MockServer,
    /// Mock server standing in for the hosted store.
    pub store_server: MockServer,
    /// Gateway client pointed at `gateway_server`.
    pub gateway: GatewayClient,
    /// Store client pointed at `store_server`.
    pub store: StoreClient,
    /// Prefs database (temp file, cleaned up on drop).
    pub prefs: Database,
    /// The assembled console configuration.
    pub config: RitmoConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Mount a 200 JSON response for a GET on the gateway server.
    ///
    /// Sugar for the common case; tests needing request assertions or
    /// non-GET verbs mount their own `Mock` on [`TestHarness::gateway_server`].
    pub async fn stub_gateway_get(&self, path_str: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(path_str))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.gateway_server)
            .await;
    }

    /// Mount a 200 JSON response for a GET on the store server.
    pub async fn stub_store_get(&self, path_str: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(path_str))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.store_server)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder().build().await.unwrap();

        harness
            .stub_gateway_get("/api/health", json!({"status": "ok"}))
            .await;
        let health = harness.gateway.health().await.unwrap();
        assert_eq!(health.status, "ok");

        // Prefs database should be functional and empty
        let prefs = ritmo_prefs::queries::ui_prefs::all(&harness.prefs).await.unwrap();
        assert!(prefs.is_empty());
    }

    #[tokio::test]
    async fn api_key_reaches_the_store() {
        use wiremock::matchers::header;

        let harness = TestHarness::builder().with_api_key("sk-test").build().await.unwrap();

        Mock::given(method("GET"))
            .and(path("/rest/v1/clients"))
            .and(header("apikey", "sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&harness.store_server)
            .await;

        let rows: Vec<serde_json::Value> =
            harness.store.select("clients", "select=*").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn servers_are_independent_per_harness() {
        let h1 = TestHarness::builder().build().await.unwrap();
        let h2 = TestHarness::builder().build().await.unwrap();
        assert_ne!(h1.gateway_server.uri(), h2.gateway_server.uri());
        assert_ne!(h1.store_server.uri(), h2.store_server.uri());
    }
}
