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

use bon::Builder;
use std::time::Duration;

pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_CALLBACK_PATH: &str = "/oauth/callback";
pub const DEFAULT_SCOPES: &str =
    "https://www.googleapis.com/auth/bigquery.readonly https://www.googleapis.com/auth/cloud-platform.read-only";

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the OAuth2 authorization-code flow.
#[derive(Builder, Clone)]
pub struct OAuthConfig {
    /// OAuth2 client identifier
    #[builder(into)]
    pub client_id: String,
    /// OAuth2 client secret, sent to the token endpoint only
    #[builder(into)]
    pub client_secret: String,
    /// Origin the application is served from (e.g., "https://insights.example.be"); the redirect URI is derived
    /// from it
    #[builder(into)]
    pub origin: String,
    /// Path the provider redirects back to (defaults to "/oauth/callback")
    #[builder(into, default = DEFAULT_CALLBACK_PATH)]
    pub callback_path: String,
    #[builder(into, default = GOOGLE_AUTHORIZATION_ENDPOINT)]
    pub authorization_endpoint: String,
    #[builder(into, default = GOOGLE_TOKEN_ENDPOINT)]
    pub token_endpoint: String,
    /// Space separated scopes (defaults to read-only BigQuery and cloud-platform access)
    #[builder(into, default = DEFAULT_SCOPES)]
    pub scopes: String,
    /// HTTP timeout for the code exchange (defaults to 10 seconds)
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
}

impl OAuthConfig {
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.callback_path)
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("origin", &self.origin)
            .field("callback_path", &self.callback_path)
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("scopes", &self.scopes)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
