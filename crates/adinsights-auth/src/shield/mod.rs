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

//! Client-side login gate in front of the dashboard.
//!
//! This is a convenience placeholder and not a security boundary: anyone with access to the key/value store can
//! set the flag directly.

use adinsights_common::storage::{KeyValueStore, StorageError};
use bon::Builder;
use log::debug;
use std::sync::Arc;
use thiserror::Error;

pub const LOGIN_FLAG_KEY: &str = "isLoggedIn";

/// Decides whether a username/password pair is accepted.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Accepts exactly one configured username/password pair.
#[derive(Builder)]
pub struct StaticCredentialCheck {
    #[builder(into)]
    username: String,
    #[builder(into)]
    password: String,
}

impl CredentialCheck for StaticCredentialCheck {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[derive(Debug, Error)]
pub enum ShieldError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct LoginShield {
    check: Arc<dyn CredentialCheck>,
    storage: Arc<dyn KeyValueStore>,
}

impl LoginShield {
    pub fn new(check: Arc<dyn CredentialCheck>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { check, storage }
    }

    pub fn is_logged_in(&self) -> bool {
        self.storage.get(LOGIN_FLAG_KEY).as_deref() == Some("true")
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(), ShieldError> {
        if !self.check.verify(username, password) {
            debug!("Rejected login for '{}'", username);
            return Err(ShieldError::InvalidCredentials);
        }
        self.storage.set(LOGIN_FLAG_KEY, "true")?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ShieldError> {
        self.storage.remove(LOGIN_FLAG_KEY)?;
        Ok(())
    }
}
