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

use crate::storage::{KeyValueStore, StorageError};
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key/value store persisted as a single JSON object on disk.
///
/// The whole file is loaded on open and rewritten on every mutation, which is fine for the handful of keys the
/// application keeps.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`, starting empty if the file does not exist yet.
    ///
    /// # Errors
    /// Returns `StorageError::Io` if the file exists but cannot be read, or `StorageError::Corrupt` if it is not
    /// a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            load(&path)?
        } else {
            debug!("Storage file {} does not exist, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::io(format!("Store lock poisoned: {}", e)))?;
        let mut updated = entries.clone();
        f(&mut updated);
        persist(&self.path, &updated)?;
        *entries = updated;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| StorageError::io(format!("Failed to read {}: {}", path.display(), e)))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let object: Map<String, Value> = serde_json::from_str(&raw)
        .map_err(|e| StorageError::corrupt(format!("{}: {}", path.display(), e)))?;

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            other => Err(StorageError::corrupt(format!(
                "{}: value for '{}' is not a string: {}",
                path.display(),
                key,
                other
            ))),
        })
        .collect()
}

fn persist(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| StorageError::io(format!("Failed to create {}: {}", parent.display(), e)))?;
    }
    let body = serde_json::to_string_pretty(entries)
        .map_err(|e| StorageError::io(format!("Failed to encode storage: {}", e)))?;
    fs::write(path, body).map_err(|e| StorageError::io(format!("Failed to write {}: {}", path.display(), e)))
}
