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

pub mod callback;
pub mod client;
pub mod config;

#[cfg(test)]
mod tests;

pub use callback::{handle_callback, CallbackRedirect};
pub use client::OAuthFlowController;
pub use config::OAuthConfig;

use adinsights_common::storage::StorageError;
use thiserror::Error;

/// Externally visible sign-in state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    /// An authorization code is being exchanged.
    PendingCallback,
    Authenticated,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("AUTHENTICATION_FAILED: {0}")]
    AuthenticationFailed(String),

    #[error("AUTHENTICATION_FAILED: authorization code has already been used")]
    CodeAlreadyUsed,

    #[error("Invalid OAuth configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        AuthError::AuthenticationFailed(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AuthError::Configuration(message.into())
    }
}
