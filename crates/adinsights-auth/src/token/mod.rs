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

use adinsights_common::storage::{KeyValueStore, StorageError};
use adinsights_common::util::{default_clock, Clock};
use bon::Builder;
use log::{debug, warn};
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "google_access_token";
pub const TOKEN_EXPIRY_KEY: &str = "google_token_expiry";

/// An OAuth access token and the instant it stops being usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at_epoch_ms: i64,
}

impl AccessToken {
    /// A token is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms < self.expires_at_epoch_ms
    }
}

/// Persists the single access token of the current user in a key/value store.
///
/// The token value and its absolute expiry (epoch milliseconds, as a decimal string) live under two separate
/// keys. An expired token is removed the next time [`TokenStore::get_valid_token`] reads it; [`TokenStore::is_valid`]
/// applies the same rule without removing anything.
#[derive(Clone, Builder)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
    #[builder(default = default_clock())]
    clock: Arc<dyn Clock>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            clock: default_clock(),
        }
    }

    /// Stores `value` as the current token, expiring `expires_in_seconds` from now.
    ///
    /// The expiry saturates at the bounds of `i64`; a negative lifetime stores an already expired token.
    ///
    /// # Errors
    /// Returns the storage error if either key cannot be written.
    pub fn save_token(&self, value: &str, expires_in_seconds: i64) -> Result<AccessToken, StorageError> {
        let token = AccessToken {
            value: value.to_string(),
            expires_at_epoch_ms: self
                .clock
                .epoch_millis()
                .saturating_add(expires_in_seconds.saturating_mul(1000)),
        };

        self.storage.set(ACCESS_TOKEN_KEY, &token.value)?;
        self.storage
            .set(TOKEN_EXPIRY_KEY, &token.expires_at_epoch_ms.to_string())?;
        debug!("Saved access token expiring at {} ms", token.expires_at_epoch_ms);
        Ok(token)
    }

    /// Returns the token value if one is stored and has not expired.
    ///
    /// An expired token is cleared as a side effect.
    pub fn get_valid_token(&self) -> Option<String> {
        let token = self.read()?;
        if token.is_valid_at(self.clock.epoch_millis()) {
            return Some(token.value);
        }

        debug!("Access token expired at {} ms, clearing", token.expires_at_epoch_ms);
        if let Err(e) = self.clear() {
            warn!("Failed to clear expired access token: {}", e);
        }
        None
    }

    /// Reports whether a non-expired token is stored, without clearing anything.
    pub fn is_valid(&self) -> bool {
        self.read()
            .map(|token| token.is_valid_at(self.clock.epoch_millis()))
            .unwrap_or(false)
    }

    /// Removes the stored token unconditionally.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(ACCESS_TOKEN_KEY)?;
        self.storage.remove(TOKEN_EXPIRY_KEY)
    }

    fn read(&self) -> Option<AccessToken> {
        let value = self.storage.get(ACCESS_TOKEN_KEY)?;
        let raw_expiry = self.storage.get(TOKEN_EXPIRY_KEY)?;
        // An unparseable expiry is treated as already expired
        let expires_at_epoch_ms = raw_expiry.trim().parse::<i64>().unwrap_or_else(|_| {
            warn!("Stored token expiry '{}' is not a timestamp", raw_expiry);
            i64::MIN
        });
        Some(AccessToken {
            value,
            expires_at_epoch_ms,
        })
    }
}
