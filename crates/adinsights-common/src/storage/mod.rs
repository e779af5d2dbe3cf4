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

pub mod file;
pub mod mem;

#[cfg(test)]
mod tests;

pub use file::FileKeyValueStore;
pub use mem::MemoryKeyValueStore;

use thiserror::Error;

/// Flat string key/value persistence shared by the token store, the login shield and the competitor tool.
///
/// Mirrors the semantics of browser local storage: reads never fail (a missing or unreadable entry is simply
/// absent), writes may fail when the backing medium is unavailable.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StorageError::Io` if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Corrupt storage file: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        StorageError::Corrupt(message.into())
    }
}
