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

use super::client::OAuthFlowController;
use log::{error, info};
use url::form_urlencoded;

/// Where the callback route sends the user once the redirect has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackRedirect {
    AuthSuccess,
    /// The provider reported an error (e.g., the user denied consent).
    OAuthError(String),
    AuthFailed,
    NoCode,
}

impl CallbackRedirect {
    pub fn path(&self) -> &'static str {
        match self {
            CallbackRedirect::AuthSuccess => "/?auth=success",
            CallbackRedirect::OAuthError(_) => "/?error=oauth_error",
            CallbackRedirect::AuthFailed => "/?error=auth_failed",
            CallbackRedirect::NoCode => "/?error=no_code",
        }
    }
}

/// Processes one visit to the callback route.
///
/// `query` is the query string of the callback URL, with or without the leading `?`; a full path or URL is also
/// accepted. The code is exchanged at most once per call, and the returned redirect never carries the original
/// query string.
pub async fn handle_callback(controller: &OAuthFlowController, query: &str) -> CallbackRedirect {
    let query = query.split_once('?').map(|(_, q)| q).unwrap_or(query);

    let mut code = None;
    let mut provider_error = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" if code.is_none() => code = Some(value.into_owned()),
            "error" if provider_error.is_none() => provider_error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(provider_error) = provider_error {
        error!("OAuth provider returned error: {}", provider_error);
        return CallbackRedirect::OAuthError(provider_error);
    }

    let Some(code) = code.filter(|c| !c.is_empty()) else {
        error!("No authorization code received");
        return CallbackRedirect::NoCode;
    };

    match controller.complete_callback(&code).await {
        Ok(_) => {
            info!("Authentication successful");
            CallbackRedirect::AuthSuccess
        }
        Err(e) => {
            error!("Error during token exchange: {}", e);
            CallbackRedirect::AuthFailed
        }
    }
}
