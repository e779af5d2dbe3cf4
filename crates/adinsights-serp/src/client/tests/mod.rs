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

use crate::client::{CompetitorAdClient, SerpConfig, SerpError};
use adinsights_common::util::MockClock;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(base_url: &str) -> CompetitorAdClient {
    let config = SerpConfig::builder().api_key("vs-secret").base_url(base_url).build();
    let clock = Arc::new(MockClock::new(Utc.with_ymd_and_hms(2025, 6, 12, 16, 30, 0).unwrap()));
    CompetitorAdClient::new(config).unwrap().with_clock(clock)
}

fn keywords(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_ads_are_mapped_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api_key", "vs-secret"))
        .and(query_param("q", "energie leverancier"))
        .and(query_param("gl", "be"))
        .and(query_param("hl", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ads": [
                { "position": 1, "title": "Engie", "description": "Groene stroom", "displayed_url": "engie.be", "advertiser": "Engie" },
                { "title": "Luminus", "url": "https://luminus.be" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server.uri());

    let ads = client.search_ads(&keywords(&["energie leverancier"]), "BE").await.unwrap();

    assert_eq!(ads.len(), 2);
    assert_eq!(ads[0].display_url, "engie.be");
    assert_eq!(ads[0].date, "2025-06-12");
    assert_eq!(ads[1].position, 2);
    assert_eq!(ads[1].display_url, "https://luminus.be");
    assert_eq!(ads[1].description, "");
    assert_eq!(ads[1].advertiser, "");
}

#[tokio::test]
async fn test_results_are_concatenated_in_keyword_order() {
    let server = MockServer::start().await;
    for keyword in ["bank", "telecom"] {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", keyword))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ads": [ { "title": format!("{} ad", keyword) } ]
            })))
            .mount(&server)
            .await;
    }
    let client = create_client(&server.uri());

    let ads = client.search_ads(&keywords(&["bank", "telecom"]), "be").await.unwrap();

    let titles: Vec<&str> = ads.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["bank ad", "telecom ad"]);
    assert_eq!(ads[1].keyword, "telecom");
}

#[tokio::test]
async fn test_missing_ads_array_is_no_ads_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic_results": [] })))
        .mount(&server)
        .await;
    let client = create_client(&server.uri());

    let error = client.search_ads(&keywords(&["hypotheek"]), "BE").await.unwrap_err();

    assert!(matches!(error, SerpError::NoAds { ref keyword, .. } if keyword == "hypotheek"));
    assert!(error.to_string().contains("No ads found for \"hypotheek\""));
}

#[tokio::test]
async fn test_http_failure_names_keyword_and_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "first"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api_key"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ads": [] })))
        .expect(0)
        .mount(&server)
        .await;
    let client = create_client(&server.uri());

    let error = client.search_ads(&keywords(&["first", "second"]), "BE").await.unwrap_err();

    assert_eq!(error.to_string(), "API error for \"first\": 401 - invalid api_key");
}

#[test]
fn test_config_debug_redacts_key() {
    let config = SerpConfig::builder().api_key("vs-secret").build();

    let rendered = format!("{:?}", config);

    assert!(!rendered.contains("vs-secret"));
    assert!(rendered.contains("api.valueserp.com"));
}
