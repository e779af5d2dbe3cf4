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

use super::config::OAuthConfig;
use super::{AuthError, AuthState};
use crate::token::TokenStore;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

/// Longest token lifetime accepted from the token endpoint (one year).
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Drives the OAuth2 authorization-code flow and hands the resulting access token to the [`TokenStore`].
pub struct OAuthFlowController {
    config: OAuthConfig,
    http_client: Client,
    token_store: Arc<TokenStore>,
    pending: AtomicBool,
    used_codes: Mutex<HashSet<String>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl OAuthFlowController {
    /// Creates a controller with an HTTP client honouring the configured request timeout.
    pub fn new(config: OAuthConfig, token_store: Arc<TokenStore>) -> Result<Self, AuthError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AuthError::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_http_client(config, token_store, http_client))
    }

    pub fn with_http_client(config: OAuthConfig, token_store: Arc<TokenStore>, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            token_store,
            pending: AtomicBool::new(false),
            used_codes: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Builds the URL the user is sent to for consent. Depends only on configuration.
    pub fn build_authorization_url(&self) -> Result<String, AuthError> {
        let redirect_uri = self.config.redirect_uri();
        let url = Url::parse_with_params(
            &self.config.authorization_endpoint,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.config.scopes.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| {
            AuthError::configuration(format!(
                "Invalid authorization endpoint '{}': {}",
                self.config.authorization_endpoint, e
            ))
        })?;
        Ok(url.into())
    }

    pub fn state(&self) -> AuthState {
        if self.pending.load(Ordering::SeqCst) {
            AuthState::PendingCallback
        } else if self.token_store.is_valid() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Exchanges an authorization code for an access token and stores it.
    ///
    /// Codes are single use: a code that was already submitted, successfully or not, is rejected without
    /// contacting the provider.
    ///
    /// # Errors
    /// Returns `AuthError::AuthenticationFailed` if the exchange fails for any reason, `AuthError::CodeAlreadyUsed`
    /// for a repeated code, or the storage error if the token cannot be persisted.
    pub async fn complete_callback(&self, code: &str) -> Result<String, AuthError> {
        {
            let mut used = self
                .used_codes
                .lock()
                .map_err(|e| AuthError::authentication_failed(format!("Code registry poisoned: {}", e)))?;
            if !used.insert(code.to_string()) {
                return Err(AuthError::CodeAlreadyUsed);
            }
        }

        let _pending = PendingGuard::enter(&self.pending);
        let token = self.exchange_code(code).await?;
        self.token_store.save_token(&token.access_token, token.expires_in)?;
        debug!("Authorization code exchanged, token valid for {}s", token.expires_in);
        Ok(token.access_token)
    }

    /// Forgets the current token.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.token_store.clear()?;
        debug!("Signed out");
        Ok(())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let redirect_uri = self.config.redirect_uri();
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post(&self.config.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::authentication_failed(format!("Failed to send token request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            error!("Token exchange failed with status {}", status);
            return Err(AuthError::authentication_failed(format!(
                "Failed to exchange code for token, status {}: {}",
                status, body
            )));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::authentication_failed(format!("Failed to parse token response: {}", e)))?;
        if !(0..=MAX_TOKEN_LIFETIME_SECONDS).contains(&token.expires_in) {
            error!("Token endpoint returned out-of-range expires_in {}", token.expires_in);
            return Err(AuthError::authentication_failed(format!(
                "Token lifetime {}s is outside 0..={}s",
                token.expires_in, MAX_TOKEN_LIFETIME_SECONDS
            )));
        }
        Ok(token)
    }
}

/// Marks the controller as waiting on the provider until dropped.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
