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

use super::create_fixture;
use crate::oauth::{AuthError, AuthState};
use chrono::TimeDelta;
use std::collections::HashMap;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_authorization_url_carries_all_parameters() {
    let fixture = create_fixture("https://oauth2.googleapis.com/token");

    let url = fixture.controller.build_authorization_url().unwrap();
    let parsed = Url::parse(&url).unwrap();
    let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();

    assert_eq!(parsed.host_str(), Some("accounts.google.com"));
    assert_eq!(parsed.path(), "/o/oauth2/v2/auth");
    assert_eq!(params["client_id"], "client-123.apps.googleusercontent.com");
    assert_eq!(params["redirect_uri"], "https://insights.example.be/oauth/callback");
    assert_eq!(params["response_type"], "code");
    assert_eq!(
        params["scope"],
        "https://www.googleapis.com/auth/bigquery.readonly https://www.googleapis.com/auth/cloud-platform.read-only"
    );
    assert_eq!(params["access_type"], "offline");
    assert_eq!(params["prompt"], "consent");
    assert!(!params.contains_key("client_secret"), "Secret must never appear in the browser URL");
}

#[tokio::test]
async fn test_authorization_url_is_deterministic() {
    let fixture = create_fixture("https://oauth2.googleapis.com/token");

    let first = fixture.controller.build_authorization_url().unwrap();
    let second = fixture.controller.build_authorization_url().unwrap();

    assert_eq!(first, second);
    assert_eq!(fixture.controller.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_complete_callback_stores_token_with_expiry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=abc123"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains(
            "redirect_uri=https%3A%2F%2Finsights.example.be%2Foauth%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.fresh",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fixture = create_fixture(&format!("{}/token", mock_server.uri()));

    let token = fixture
        .controller
        .complete_callback("abc123")
        .await
        .expect("Code exchange should succeed");

    assert_eq!(token, "ya29.fresh");
    assert_eq!(fixture.controller.state(), AuthState::Authenticated);

    fixture.clock.advance(TimeDelta::seconds(3599));
    assert!(fixture.token_store.is_valid());
    assert_eq!(fixture.token_store.get_valid_token().as_deref(), Some("ya29.fresh"));

    fixture.clock.advance(TimeDelta::seconds(1));
    assert!(!fixture.token_store.is_valid());
    assert_eq!(fixture.controller.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_complete_callback_http_failure_is_authentication_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Bad Request"
        })))
        .mount(&mock_server)
        .await;

    let fixture = create_fixture(&format!("{}/token", mock_server.uri()));

    let result = fixture.controller.complete_callback("expired-code").await;

    match result {
        Err(AuthError::AuthenticationFailed(message)) => assert!(message.contains("invalid_grant")),
        other => panic!("Expected AuthenticationFailed, got {:?}", other),
    }
    assert_eq!(fixture.controller.state(), AuthState::Unauthenticated);
    assert!(!fixture.token_store.is_valid());
}

#[tokio::test]
async fn test_complete_callback_malformed_body_is_authentication_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let fixture = create_fixture(&format!("{}/token", mock_server.uri()));

    let result = fixture.controller.complete_callback("abc123").await;

    assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    assert_eq!(fixture.token_store.get_valid_token(), None);
}

#[tokio::test]
async fn test_complete_callback_rejects_out_of_range_lifetime() {
    for expires_in in [i64::MAX / 100, -1] {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.bogus",
                "expires_in": expires_in
            })))
            .mount(&mock_server)
            .await;

        let fixture = create_fixture(&format!("{}/token", mock_server.uri()));

        let result = fixture.controller.complete_callback("abc123").await;

        assert!(
            matches!(result, Err(AuthError::AuthenticationFailed(_))),
            "expires_in {} should be rejected",
            expires_in
        );
        assert_eq!(fixture.token_store.get_valid_token(), None);
        assert_eq!(fixture.controller.state(), AuthState::Unauthenticated);
    }
}

#[tokio::test]
async fn test_reused_code_is_rejected_without_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.once",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fixture = create_fixture(&format!("{}/token", mock_server.uri()));

    fixture.controller.complete_callback("abc123").await.unwrap();
    let second = fixture.controller.complete_callback("abc123").await;

    assert!(matches!(second, Err(AuthError::CodeAlreadyUsed)));
    assert!(second.unwrap_err().to_string().starts_with("AUTHENTICATION_FAILED"));
}

#[tokio::test]
async fn test_sign_out_clears_token() {
    let fixture = create_fixture("https://oauth2.googleapis.com/token");
    fixture.token_store.save_token("ya29.existing", 3600).unwrap();
    assert_eq!(fixture.controller.state(), AuthState::Authenticated);

    fixture.controller.sign_out().unwrap();

    assert_eq!(fixture.controller.state(), AuthState::Unauthenticated);
    assert_eq!(fixture.token_store.get_valid_token(), None);
}

#[test]
fn test_config_debug_redacts_secret() {
    let fixture = create_fixture("https://oauth2.googleapis.com/token");

    let rendered = format!("{:?}", fixture.controller.config());

    assert!(!rendered.contains("s3cret"));
    assert!(rendered.contains("***"));
}
