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

pub mod insights;

#[cfg(test)]
mod tests;

pub use insights::CachedInsights;

use adinsights_common::util::Clock;
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Freshness and retention rules for cached results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// A result younger than this is served without fetching.
    pub fresh_for: TimeDelta,
    /// An entry not read for this long is dropped.
    pub evict_after_idle: TimeDelta,
    /// Additional attempts after a failed fetch.
    pub retries: u32,
}

impl CachePolicy {
    pub fn standard() -> Self {
        Self {
            fresh_for: TimeDelta::minutes(5),
            evict_after_idle: TimeDelta::minutes(10),
            retries: 1,
        }
    }

    pub fn domain_lookup() -> Self {
        Self {
            fresh_for: TimeDelta::minutes(30),
            evict_after_idle: TimeDelta::hours(1),
            retries: 1,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

struct CacheEntry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
    last_read: DateTime<Utc>,
}

/// In-memory result cache keyed by request parameters.
///
/// Fetches for the same key are serialized; a caller that waited on another caller's fetch is served the value
/// that fetch produced.
pub struct QueryCache<V> {
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    key_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            entries: Mutex::new(HashMap::new()),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the fresh cached value for `key`, or runs `fetch` (retrying per policy) and caches its result.
    ///
    /// # Errors
    /// Returns the error of the last attempt when every attempt fails. Failures are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        if let Some(value) = self.fresh(key) {
            debug!("Cache hit for {}", key);
            return Ok(value);
        }

        let key_lock = self.key_lock(key);
        let _guard = key_lock.lock().await;

        // Another caller may have completed the fetch while this one waited
        if let Some(value) = self.fresh(key) {
            debug!("Cache hit for {} after waiting", key);
            return Ok(value);
        }

        debug!("Cache miss for {}", key);
        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => {
                    self.store(key, value.clone());
                    return Ok(value);
                }
                Err(e) if attempt < self.policy.retries => {
                    attempt += 1;
                    debug!("Fetch for {} failed, retrying ({}/{}): {}", key, attempt, self.policy.retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.lock_entries();
        entries.remove(key);
        self.prune_locks(&entries);
    }

    pub fn clear(&self) {
        let mut entries = self.lock_entries();
        entries.clear();
        self.prune_locks(&entries);
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops idle entries, then returns the value for `key` if it is still fresh.
    fn fresh(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_read < self.policy.evict_after_idle);
        if entries.len() < before {
            debug!("Evicted {} idle cache entries", before - entries.len());
        }
        self.prune_locks(&entries);

        let entry = entries.get_mut(key)?;
        entry.last_read = now;
        if now - entry.fetched_at < self.policy.fresh_for {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn store(&self, key: &str, value: V) {
        let now = self.clock.now();
        self.lock_entries().insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: now,
                last_read: now,
            },
        );
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.key_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(key.to_string()).or_default().clone()
    }

    /// Drops key locks that guard no entry and that no caller currently holds.
    ///
    /// Called with the entries lock held; `key_lock` never takes the entries lock, so the order is fixed.
    fn prune_locks(&self, entries: &HashMap<String, CacheEntry<V>>) {
        let mut locks = self.key_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.retain(|key, lock| entries.contains_key(key) || Arc::strong_count(lock) > 1);
    }

    #[cfg(test)]
    fn lock_count(&self) -> usize {
        self.key_locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
