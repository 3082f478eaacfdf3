// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level verbs against the hosted relational store.
//!
//! The store speaks JSON over HTTP with PostgREST-style query parameters:
//! `GET /rest/v1/{table}?col=eq.value&select=*`, `POST` with
//! `Prefer: return=representation`, `PATCH` and `DELETE` with filters.
//! Typed per-table operations live in [`crate::tables`]; this module only
//! knows about rows.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use ritmo_config::model::DatastoreConfig;
use ritmo_core::RitmoError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the hosted relational store.
///
/// Same failure posture as the gateway client: one attempt per call, errors
/// surface immediately.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
}

/// Error body shape the store produces for rejected requests.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl StoreClient {
    /// Creates a new store client from configuration.
    pub fn new(config: &DatastoreConfig) -> Result<Self, RitmoError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let api_key = HeaderValue::from_str(key).map_err(|e| RitmoError::Store {
                status: None,
                message: format!("datastore api key is not a valid header value: {e}"),
                source: Some(Box::new(e)),
            })?;
            let bearer =
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| RitmoError::Store {
                    status: None,
                    message: format!("datastore api key is not a valid header value: {e}"),
                    source: Some(Box::new(e)),
                })?;
            headers.insert("apikey", api_key);
            headers.insert("authorization", bearer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RitmoError::Store {
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

    fn url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{table}", self.base_url)
        } else {
            format!("{}/rest/v1/{table}?{query}", self.base_url)
        }
    }

    /// `GET` rows matching the filter.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, RitmoError> {
        let response = self
            .client
            .get(self.url(table, query))
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(table, response).await
    }

    /// `GET` expecting at most one row.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Option<T>, RitmoError> {
        let rows: Vec<T> = self.select(table, query).await?;
        Ok(rows.into_iter().next())
    }

    /// `POST` one or more rows, returning what the store persisted. The body
    /// may be a single object or an array.
    pub async fn insert_rows<B, T>(&self, table: &str, body: &B) -> Result<Vec<T>, RitmoError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(table, ""))
            .header("prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(table, response).await
    }

    /// `POST` a single row.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T, RitmoError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.insert_rows(table, body).await?;
        rows.into_iter().next().ok_or_else(|| RitmoError::Store {
            status: None,
            message: format!("insert into {table} returned no rows"),
            source: None,
        })
    }

    /// `PATCH` rows matching the filter, returning the rows that matched.
    pub async fn update<B, T>(
        &self,
        table: &str,
        query: &str,
        body: &B,
    ) -> Result<Vec<T>, RitmoError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .patch(self.url(table, query))
            .header("prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(table, response).await
    }

    /// Version-checked `PATCH` of a single row: the filter carries the
    /// version the caller read, so a concurrent writer makes the patch match
    /// zero rows, which surfaces as [`RitmoError::Conflict`].
    pub async fn update_checked<B, T>(
        &self,
        table: &str,
        id_col: &str,
        id: &str,
        expected_version: i64,
        body: &B,
    ) -> Result<T, RitmoError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = format!("{id_col}=eq.{id}&version=eq.{expected_version}");
        let rows: Vec<T> = self.update(table, &query, body).await?;
        rows.into_iter().next().ok_or_else(|| RitmoError::Conflict {
            table: table.to_string(),
            id: id.to_string(),
        })
    }

    /// `DELETE` rows matching the filter.
    pub async fn delete(&self, table: &str, query: &str) -> Result<(), RitmoError> {
        let response = self
            .client
            .delete(self.url(table, query))
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        debug!(status = %status, table, "store response received");
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }
}

async fn read_rows<T: DeserializeOwned>(
    table: &str,
    response: reqwest::Response,
) -> Result<Vec<T>, RitmoError> {
    let status = response.status();
    debug!(status = %status, table, "store response received");

    if status.is_success() {
        let body = response.text().await.map_err(|e| RitmoError::Store {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| RitmoError::Store {
            status: Some(status.as_u16()),
            message: format!("failed to parse rows from {table}: {e}"),
            source: Some(Box::new(e)),
        })
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// A request that never reached the store (refused, timed out, DNS).
fn transport_error(e: reqwest::Error) -> RitmoError {
    RitmoError::Store {
        status: None,
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Shape a non-2xx response into a store error, preferring the store's own
/// `{message, code?, hint?}` body when it parses.
fn api_error(status: StatusCode, body: &str) -> RitmoError {
    let message = match serde_json::from_str::<StoreErrorBody>(body) {
        Ok(parsed) => {
            let mut message =
                format!("store rejected the request ({}): {}", status.as_u16(), parsed.message);
            if let Some(code) = parsed.code {
                message.push_str(&format!(" [{code}]"));
            }
            if let Some(hint) = parsed.hint {
                message.push_str(&format!(" ({hint})"));
            }
            message
        }
        Err(_) => format!("store returned {status}: {body}"),
    };
    RitmoError::Store {
        status: Some(status.as_u16()),
        message,
        source: None,
    }
}
