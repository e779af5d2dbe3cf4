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

#[cfg(test)]
mod tests;

use adinsights_common::util::{default_clock, Clock};
use bon::Builder;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const VALUESERP_BASE_URL: &str = "https://api.valueserp.com";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Builder, Clone)]
pub struct SerpConfig {
    #[builder(into)]
    pub api_key: String,
    #[builder(into, default = VALUESERP_BASE_URL)]
    pub base_url: String,
    /// Interface language passed as `hl` (defaults to "en")
    #[builder(into, default = DEFAULT_LANGUAGE)]
    pub language: String,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
}

impl std::fmt::Debug for SerpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// A paid search result shown for a keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpAd {
    pub keyword: String,
    pub position: u64,
    pub title: String,
    pub description: String,
    pub display_url: String,
    pub advertiser: String,
    /// Day the ad was observed
    pub date: String,
}

#[derive(Debug, Error)]
pub enum SerpError {
    #[error("API error for \"{keyword}\": {status} - {body}")]
    Api { keyword: String, status: u16, body: String },

    #[error("No ads found for \"{keyword}\". Full response: {response}")]
    NoAds { keyword: String, response: String },

    #[error("Request for \"{keyword}\" failed: {message}")]
    Network { keyword: String, message: String },

    #[error("Invalid search API configuration: {0}")]
    Configuration(String),
}

impl SerpError {
    pub fn network(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        SerpError::Network {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SerpError::Configuration(message.into())
    }
}

#[derive(Default, Deserialize)]
struct RawAd {
    #[serde(default)]
    position: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    displayed_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    advertiser: Option<String>,
}

/// Looks up the search ads competitors run for a set of keywords.
pub struct CompetitorAdClient {
    config: SerpConfig,
    http_client: Client,
    clock: Arc<dyn Clock>,
}

impl CompetitorAdClient {
    pub fn new(config: SerpConfig) -> Result<Self, SerpError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SerpError::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
            clock: default_clock(),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Searches each keyword in turn and concatenates the ads in keyword order.
    ///
    /// # Errors
    /// The first keyword that fails aborts the search; ads collected for earlier keywords are discarded.
    pub async fn search_ads(&self, keywords: &[String], region: &str) -> Result<Vec<SerpAd>, SerpError> {
        let mut all_ads = Vec::new();
        for keyword in keywords {
            let ads = self.search_keyword(keyword, region).await?;
            debug!("Found {} ads for \"{}\"", ads.len(), keyword);
            all_ads.extend(ads);
        }
        Ok(all_ads)
    }

    async fn search_keyword(&self, keyword: &str, region: &str) -> Result<Vec<SerpAd>, SerpError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let region = region.to_lowercase();
        let params = [
            ("api_key", self.config.api_key.as_str()),
            ("q", keyword),
            ("gl", region.as_str()),
            ("hl", self.config.language.as_str()),
        ];

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SerpError::network(keyword, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SerpError::network(keyword, e.to_string()))?;

        if !status.is_success() {
            error!("Search for \"{}\" failed with status {}", keyword, status);
            return Err(SerpError::Api {
                keyword: keyword.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| SerpError::network(keyword, format!("Failed to parse search response: {}", e)))?;
        let raw_ads = match data.get("ads") {
            Some(Value::Array(ads)) => ads.clone(),
            _ => {
                return Err(SerpError::NoAds {
                    keyword: keyword.to_string(),
                    response: data.to_string(),
                })
            }
        };

        let date = self.clock.now().date_naive().format("%Y-%m-%d").to_string();
        Ok(raw_ads
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let ad: RawAd = serde_json::from_value(raw).unwrap_or_default();
                SerpAd {
                    keyword: keyword.to_string(),
                    position: ad.position.filter(|p| *p > 0).unwrap_or(index as u64 + 1),
                    title: ad.title.unwrap_or_default(),
                    description: ad.description.unwrap_or_default(),
                    display_url: ad
                        .displayed_url
                        .filter(|u| !u.is_empty())
                        .or(ad.url)
                        .unwrap_or_default(),
                    advertiser: ad.advertiser.unwrap_or_default(),
                    date: date.clone(),
                }
            })
            .collect())
    }
}
