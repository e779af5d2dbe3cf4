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

//! Typed records shared by warehouse rows and synthetic data.
//!
//! Warehouse rows carry loosely typed cells (numbers frequently arrive as strings), so `from_row` is where
//! values are coerced and absent fields receive their defaults.

use crate::query::{QueryError, QueryErrorKind, Row};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const REGION_CODE: &str = "BE";
const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserRecord {
    pub name: String,
    pub advertiser_id: String,
    pub category: String,
    pub total_spend: f64,
    pub total_ads: u64,
    pub first_ad_date: String,
    pub last_ad_date: String,
    pub region: String,
}

impl AdvertiserRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            name: text(row, "advertiser_name").unwrap_or_else(|| UNKNOWN.to_string()),
            advertiser_id: text(row, "advertiser_id").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            category: text(row, "category").unwrap_or_else(|| UNKNOWN.to_string()),
            total_spend: number(row, "total_spend").unwrap_or(0.0),
            total_ads: count(row, "total_ads"),
            first_ad_date: text(row, "first_ad_date").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            last_ad_date: text(row, "last_ad_date").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            region: REGION_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserStats {
    pub total_advertisers: u64,
    pub total_ads: u64,
    pub total_spend: f64,
}

impl AdvertiserStats {
    pub fn from_row(row: &Row) -> Self {
        Self {
            total_advertisers: count(row, "total_advertisers"),
            total_ads: count(row, "total_ads"),
            total_spend: number(row, "total_spend").unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvertiserRecord {
    pub name: String,
    pub advertiser_id: String,
    pub category: String,
    pub first_ad_date: String,
    pub total_ads: u64,
    pub max_spend: f64,
}

impl NewAdvertiserRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            name: text(row, "advertiser_name").unwrap_or_else(|| UNKNOWN.to_string()),
            advertiser_id: text(row, "advertiser_id").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            category: text(row, "category").unwrap_or_else(|| UNKNOWN.to_string()),
            first_ad_date: text(row, "first_ad_date").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            total_ads: count(row, "total_ads"),
            max_spend: number(row, "max_spend").unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserDomain {
    pub name: String,
    pub advertiser_id: String,
    pub url: String,
}

impl AdvertiserDomain {
    pub fn from_row(row: &Row) -> Self {
        let name = text(row, "advertiser_name").unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            url: domain_for(&name),
            advertiser_id: text(row, "advertiser_id").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name,
        }
    }
}

/// Guesses an advertiser's domain: the lower-cased name with all whitespace removed, under `.be`.
pub fn domain_for(name: &str) -> String {
    let mut url: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    url.push_str(".be");
    url
}

/// Stands in for a record list when a query succeeded without matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoDataMarker {
    #[serde(rename = "_noBelgiumData")]
    pub no_belgium_data: bool,
}

impl Default for NoDataMarker {
    fn default() -> Self {
        Self { no_belgium_data: true }
    }
}

/// Result of a data access call: real rows, an empty result, or synthetic rows standing in for a failed query.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(Vec<T>),
    NoData,
    Mock { records: Vec<T>, cause: QueryError },
}

impl<T> FetchOutcome<T> {
    /// The records regardless of provenance; empty for `NoData`.
    pub fn records(&self) -> &[T] {
        match self {
            FetchOutcome::Live(records) | FetchOutcome::Mock { records, .. } => records,
            FetchOutcome::NoData => &[],
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, FetchOutcome::Mock { .. })
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchOutcome::NoData)
    }

    pub fn cause(&self) -> Option<&QueryError> {
        match self {
            FetchOutcome::Mock { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Human-readable notice explaining why synthetic data is shown, if it is.
    pub fn banner(&self) -> Option<String> {
        self.cause().map(banner_for)
    }
}

impl<T: Serialize> Serialize for FetchOutcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FetchOutcome::Live(records) | FetchOutcome::Mock { records, .. } => records.serialize(serializer),
            FetchOutcome::NoData => [NoDataMarker::default()].serialize(serializer),
        }
    }
}

fn banner_for(cause: &QueryError) -> String {
    match cause.kind() {
        Some(QueryErrorKind::NotAuthenticated) | Some(QueryErrorKind::AuthenticationFailed) => format!(
            "Authentication required ({}): sign in with Google to access real BigQuery data. Currently showing sample data.",
            cause
        ),
        Some(QueryErrorKind::ProjectSetupError) => format!(
            "Google Cloud project setup required: {} Currently showing sample data.",
            cause.detail()
        ),
        Some(QueryErrorKind::PermissionError) => {
            format!("BigQuery permission error: {}. Showing sample data.", cause.detail())
        }
        Some(QueryErrorKind::ApiError) => format!("BigQuery API error: {}. Showing sample data.", cause.detail()),
        None => format!(
            "BigQuery error: {}. Displaying sample data for demonstration purposes.",
            cause
        ),
    }
}

fn text(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(row: &Row, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn count(row: &Row, key: &str) -> u64 {
    number(row, key)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64)
        .unwrap_or(0)
}
