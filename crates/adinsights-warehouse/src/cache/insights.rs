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

use super::{CachePolicy, QueryCache};
use crate::access::AdInsights;
use crate::period::{CategoryFilter, Period};
use crate::query::QueryError;
use crate::records::{AdvertiserDomain, AdvertiserRecord, AdvertiserStats, FetchOutcome, NewAdvertiserRecord};
use adinsights_auth::TokenStore;
use adinsights_common::util::Clock;
use std::convert::Infallible;
use std::sync::Arc;

/// [`AdInsights`] behind per-operation caches.
///
/// Keys include whether a valid token is stored, so signing in or out never serves results fetched under the
/// other state.
pub struct CachedInsights {
    insights: AdInsights,
    token_store: Arc<TokenStore>,
    spend: QueryCache<FetchOutcome<AdvertiserRecord>>,
    stats: QueryCache<FetchOutcome<AdvertiserStats>>,
    new_advertisers: QueryCache<FetchOutcome<NewAdvertiserRecord>>,
    all_advertisers: QueryCache<FetchOutcome<AdvertiserRecord>>,
    domains: QueryCache<FetchOutcome<AdvertiserDomain>>,
}

impl CachedInsights {
    pub fn new(insights: AdInsights, token_store: Arc<TokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            insights,
            token_store,
            spend: QueryCache::new(CachePolicy::standard(), clock.clone()),
            stats: QueryCache::new(CachePolicy::standard(), clock.clone()),
            new_advertisers: QueryCache::new(CachePolicy::standard(), clock.clone()),
            all_advertisers: QueryCache::new(CachePolicy::standard(), clock.clone()),
            domains: QueryCache::new(CachePolicy::domain_lookup(), clock),
        }
    }

    pub async fn ad_spend(&self, period: Period, category: CategoryFilter) -> FetchOutcome<AdvertiserRecord> {
        let key = self.key(&["spend", period.token(), category.as_str()]);
        let result = self
            .spend
            .get_or_fetch(&key, move || async move {
                Ok::<_, Infallible>(self.insights.ad_spend(period, category).await)
            })
            .await;
        into_ok(result)
    }

    pub async fn advertiser_stats(
        &self,
        category: CategoryFilter,
        period: Option<Period>,
    ) -> FetchOutcome<AdvertiserStats> {
        let window = period.map(|p| p.token()).unwrap_or("all-time");
        let key = self.key(&["stats", window, category.as_str()]);
        let result = self
            .stats
            .get_or_fetch(&key, move || async move {
                Ok::<_, Infallible>(self.insights.advertiser_stats(category, period).await)
            })
            .await;
        into_ok(result)
    }

    pub async fn new_advertisers(
        &self,
        period: Period,
        category: CategoryFilter,
        limit: u32,
    ) -> FetchOutcome<NewAdvertiserRecord> {
        let limit_part = limit.to_string();
        let key = self.key(&["new", period.token(), category.as_str(), &limit_part]);
        let result = self
            .new_advertisers
            .get_or_fetch(&key, move || async move {
                Ok::<_, Infallible>(self.insights.new_advertisers(period, category, limit).await)
            })
            .await;
        into_ok(result)
    }

    pub async fn all_advertisers(
        &self,
        period: Period,
        category: CategoryFilter,
        limit: u32,
    ) -> FetchOutcome<AdvertiserRecord> {
        let limit_part = limit.to_string();
        let key = self.key(&["all", period.token(), category.as_str(), &limit_part]);
        let result = self
            .all_advertisers
            .get_or_fetch(&key, move || async move {
                Ok::<_, Infallible>(self.insights.all_advertisers(period, category, limit).await)
            })
            .await;
        into_ok(result)
    }

    pub async fn advertiser_domains(&self) -> Result<FetchOutcome<AdvertiserDomain>, QueryError> {
        let key = self.key(&["domains"]);
        self.domains
            .get_or_fetch(&key, || self.insights.advertiser_domains())
            .await
    }

    fn key(&self, parts: &[&str]) -> String {
        format!("{}|authenticated={}", parts.join("|"), self.token_store.is_valid())
    }
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
