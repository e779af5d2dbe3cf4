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

use adinsights_auth::OAuthConfig;
use std::path::PathBuf;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_PROJECT_ID: &str = "oceans-are-rising";
pub const DEFAULT_STATE_FILE: &str = ".adinsights/state.json";

pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Origin the OAuth redirect URI is derived from.
    pub origin: String,
    pub project_id: String,
    /// JSON file holding the token, login flag and search API key.
    pub state_file: PathBuf,
    pub shield_username: Option<String>,
    pub shield_password: Option<String>,
    pub valueserp_api_key: Option<String>,
}

impl Config {
    /// Builds the configuration from a variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Config {
            client_id: var("ADINSIGHTS_CLIENT_ID"),
            client_secret: var("ADINSIGHTS_CLIENT_SECRET"),
            origin: var("ADINSIGHTS_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.into()),
            project_id: var("ADINSIGHTS_PROJECT_ID").unwrap_or_else(|| DEFAULT_PROJECT_ID.into()),
            state_file: var("ADINSIGHTS_STATE_FILE")
                .unwrap_or_else(|| DEFAULT_STATE_FILE.into())
                .into(),
            shield_username: var("ADINSIGHTS_SHIELD_USERNAME"),
            shield_password: var("ADINSIGHTS_SHIELD_PASSWORD"),
            valueserp_api_key: var("VALUESERP_API_KEY"),
        }
    }

    /// OAuth settings; the client id and secret are required.
    pub fn oauth_config(&self) -> anyhow::Result<OAuthConfig> {
        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            anyhow::bail!("ADINSIGHTS_CLIENT_ID and ADINSIGHTS_CLIENT_SECRET must be set to sign in with Google");
        };
        Ok(OAuthConfig::builder()
            .client_id(client_id.as_str())
            .client_secret(client_secret.as_str())
            .origin(self.origin.as_str())
            .build())
    }

    /// The login shield is active only when both credentials are configured.
    pub fn shield_credentials(&self) -> Option<(&str, &str)> {
        match (&self.shield_username, &self.shield_password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("origin", &self.origin)
            .field("project_id", &self.project_id)
            .field("state_file", &self.state_file)
            .field("shield_username", &self.shield_username)
            .field("shield_password", &redacted(&self.shield_password))
            .field("valueserp_api_key", &redacted(&self.valueserp_api_key))
            .finish()
    }
}

pub fn load() -> Config {
    dotenvy::dotenv().ok();
    Config::from_lookup(|name| std::env::var(name).ok())
}
