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

//! Execution of SQL text against the warehouse REST API.

pub mod bigquery;
pub mod classify;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use bigquery::{BigQueryExecutor, WarehouseConfig};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A result row keyed by schema field name, in schema order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Runs a query and returns its normalized rows.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Vec<Row>, QueryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    NotAuthenticated,
    AuthenticationFailed,
    PermissionError,
    ProjectSetupError,
    ApiError,
}

impl QueryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryErrorKind::NotAuthenticated => "NOT_AUTHENTICATED",
            QueryErrorKind::AuthenticationFailed => "AUTHENTICATION_FAILED",
            QueryErrorKind::PermissionError => "PERMISSION_ERROR",
            QueryErrorKind::ProjectSetupError => "PROJECT_SETUP_ERROR",
            QueryErrorKind::ApiError => "API_ERROR",
        }
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A failure reported by the warehouse, rendered as `"<KIND>: <message>"`.
    #[error("{kind}: {message}")]
    Classified { kind: QueryErrorKind, message: String },

    /// Transport failures and undecodable responses.
    #[error("Network error: {0}")]
    Network(String),
}

impl QueryError {
    pub fn classified(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        QueryError::Classified {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        QueryError::Network(message.into())
    }

    pub fn kind(&self) -> Option<QueryErrorKind> {
        match self {
            QueryError::Classified { kind, .. } => Some(*kind),
            QueryError::Network(_) => None,
        }
    }

    /// The message without its kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            QueryError::Classified { message, .. } => message,
            QueryError::Network(message) => message,
        }
    }
}
