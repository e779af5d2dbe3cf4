//  Copyright (c) 2026 Metaform Systems, Inc
//
//  This program and the accompanying materials are made available under the
//  terms of the Apache License, Version 2.0 which is available at
//  https://www.apache.org/licenses/LICENSE-2.0
//
//  SPDX-License-Identifier: Apache-2.0
//
//  Contributors:
//       Metaform Systems, Inc. - initial API and implementation
//

use super::classify::classify_failure;
use super::normalize::{normalize, QueryResponse};
use super::{QueryError, QueryErrorKind, QueryExecutor, Row};
use adinsights_auth::TokenStore;
use async_trait::async_trait;
use bon::Builder;
use log::{debug, error, warn};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const BIGQUERY_API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";
pub const DEFAULT_PROJECT_ID: &str = "oceans-are-rising";
pub const DEFAULT_MAX_RESULTS: u32 = 1000;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message carried by the error raised when no usable token is stored.
pub const MISSING_TOKEN_MESSAGE: &str = "NOT_AUTHENTICATED - no valid access token available";

/// Configuration for the warehouse query endpoint.
#[derive(Builder, Clone, Debug)]
pub struct WarehouseConfig {
    /// Project the queries are billed to (defaults to "oceans-are-rising")
    #[builder(into, default = DEFAULT_PROJECT_ID)]
    pub project_id: String,
    /// REST API base URL (defaults to the public BigQuery v2 endpoint)
    #[builder(into, default = BIGQUERY_API_BASE)]
    pub api_base: String,
    #[builder(default = DEFAULT_MAX_RESULTS)]
    pub max_results: u32,
    /// HTTP timeout per query (defaults to 30 seconds)
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
}

impl WarehouseConfig {
    pub fn query_url(&self) -> String {
        format!(
            "{}/projects/{}/queries",
            self.api_base.trim_end_matches('/'),
            self.project_id
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    use_legacy_sql: bool,
    max_results: u32,
}

/// Executes queries synchronously through the `jobs.query` REST call using the stored access token.
pub struct BigQueryExecutor {
    config: WarehouseConfig,
    http_client: Client,
    token_store: Arc<TokenStore>,
}

impl BigQueryExecutor {
    pub fn new(config: WarehouseConfig, token_store: Arc<TokenStore>) -> Result<Self, QueryError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| QueryError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_http_client(config, token_store, http_client))
    }

    pub fn with_http_client(config: WarehouseConfig, token_store: Arc<TokenStore>, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            token_store,
        }
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }
}

#[async_trait]
impl QueryExecutor for BigQueryExecutor {
    async fn execute(&self, query: &str) -> Result<Vec<Row>, QueryError> {
        let token = self.token_store.get_valid_token().ok_or_else(|| {
            debug!("No access token available, query not sent");
            QueryError::classified(QueryErrorKind::AuthenticationFailed, MISSING_TOKEN_MESSAGE)
        })?;

        let url = self.config.query_url();
        debug!(
            "Dispatching query to {} with token {}...",
            url,
            token.chars().take(8).collect::<String>()
        );

        let request = QueryRequest {
            query,
            use_legacy_sql: false,
            max_results: self.config.max_results,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| QueryError::network(format!("Failed to send query request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::network(format!("Failed to read query response: {}", e)))?;

        if !status.is_success() {
            let classified = classify_failure(status.as_u16(), &body);
            error!("Query failed with status {}: {}", status, classified);
            return Err(classified);
        }

        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| QueryError::network(format!("Failed to parse query response: {}", e)))?;

        if let Some(error) = &parsed.error {
            warn!("Query returned an error payload with status {}", status);
            return Err(QueryError::classified(QueryErrorKind::ApiError, error.to_string()));
        }

        let rows = normalize(parsed);
        debug!("Query returned {} rows", rows.len());
        Ok(rows)
    }
}
