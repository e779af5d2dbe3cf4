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

use adinsights_common::storage::{KeyValueStore, StorageError};
use std::sync::Arc;

pub const API_KEY_STORAGE_KEY: &str = "valueserp_api_key";

/// Remembers the search API key between runs. The key has no expiry.
pub struct ApiKeyStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ApiKeyStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get(API_KEY_STORAGE_KEY).filter(|key| !key.is_empty())
    }

    pub fn save(&self, api_key: &str) -> Result<(), StorageError> {
        self.storage.set(API_KEY_STORAGE_KEY, api_key)
    }
}
