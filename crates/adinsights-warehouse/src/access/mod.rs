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

//! Named data operations over the Belgian ads dataset.
//!
//! Every operation except the domain lookup absorbs query failures: the caller receives synthetic records of the
//! same shape together with the error that caused the fallback. A successful query without rows is reported as
//! [`FetchOutcome::NoData`] and never replaced by synthetic records.
//!
//! The dataset has no category column. Category filters are accepted by every operation but only narrow the
//! synthetic records.

pub mod sql;

#[cfg(test)]
pub(crate) mod tests;

use crate::mock::MockDataGenerator;
use crate::period::{CategoryFilter, Period};
use crate::query::{QueryError, QueryExecutor, Row};
use crate::records::{AdvertiserDomain, AdvertiserRecord, AdvertiserStats, FetchOutcome, NewAdvertiserRecord};
use adinsights_common::util::{default_clock, Clock};
use bon::Builder;
use log::{debug, warn};
use std::sync::Arc;

pub const DEFAULT_NEW_ADVERTISER_LIMIT: u32 = 30;
pub const DEFAULT_ALL_ADVERTISER_LIMIT: u32 = 50;

/// Synthetic spend lists are drawn from a pool of this size.
const MOCK_SPEND_COUNT: usize = 50;

#[derive(Clone, Builder)]
pub struct AdInsights {
    executor: Arc<dyn QueryExecutor>,
    #[builder(default = Arc::new(MockDataGenerator::new()))]
    mock: Arc<MockDataGenerator>,
    #[builder(default = default_clock())]
    clock: Arc<dyn Clock>,
}

impl AdInsights {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::builder().executor(executor).build()
    }

    /// Top 50 advertisers by spend within the period.
    pub async fn ad_spend(&self, period: Period, category: CategoryFilter) -> FetchOutcome<AdvertiserRecord> {
        let query = sql::ad_spend_query(self.days(period));
        self.fetch("ad spend", &query, AdvertiserRecord::from_row, || {
            self.mock.ad_spend(MOCK_SPEND_COUNT, period, category)
        })
        .await
    }

    /// Headline totals, over the whole dataset when `period` is `None`.
    pub async fn advertiser_stats(
        &self,
        category: CategoryFilter,
        period: Option<Period>,
    ) -> FetchOutcome<AdvertiserStats> {
        let query = sql::stats_query(period.map(|p| self.days(p)));
        self.fetch("advertiser stats", &query, AdvertiserStats::from_row, || {
            vec![self.mock.advertiser_stats(category)]
        })
        .await
    }

    /// Advertisers ordered by their first ad, newest first.
    pub async fn new_advertisers(
        &self,
        period: Period,
        category: CategoryFilter,
        limit: u32,
    ) -> FetchOutcome<NewAdvertiserRecord> {
        let query = sql::new_advertisers_query(self.days(period), limit);
        self.fetch("new advertisers", &query, NewAdvertiserRecord::from_row, || {
            self.mock.new_advertisers(mock_count(limit), period, category)
        })
        .await
    }

    /// Advertisers alphabetically; a `limit` of zero returns all of them.
    pub async fn all_advertisers(
        &self,
        period: Period,
        category: CategoryFilter,
        limit: u32,
    ) -> FetchOutcome<AdvertiserRecord> {
        let query = sql::all_advertisers_query(self.days(period), limit);
        self.fetch("all advertisers", &query, AdvertiserRecord::from_row, || {
            self.mock.ad_spend(mock_count(limit), period, category)
        })
        .await
    }

    /// Advertiser names with a guessed `.be` domain.
    ///
    /// # Errors
    /// Unlike the other operations, query failures are returned to the caller.
    pub async fn advertiser_domains(&self) -> Result<FetchOutcome<AdvertiserDomain>, QueryError> {
        let rows = self.executor.execute(&sql::domains_query()).await.map_err(|e| {
            warn!("Advertiser domain lookup failed: {}", e);
            e
        })?;
        if rows.is_empty() {
            return Ok(FetchOutcome::NoData);
        }
        Ok(FetchOutcome::Live(rows.iter().map(AdvertiserDomain::from_row).collect()))
    }

    fn days(&self, period: Period) -> i64 {
        period.day_count(self.clock.now().date_naive())
    }

    async fn fetch<T>(
        &self,
        operation: &str,
        query: &str,
        from_row: fn(&Row) -> T,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> FetchOutcome<T> {
        match self.executor.execute(query).await {
            Ok(rows) if rows.is_empty() => {
                debug!("Query for {} returned no rows", operation);
                FetchOutcome::NoData
            }
            Ok(rows) => {
                debug!("Query for {} returned {} rows", operation, rows.len());
                FetchOutcome::Live(rows.iter().map(from_row).collect())
            }
            Err(cause) => {
                warn!("Query for {} failed, using sample data: {}", operation, cause);
                FetchOutcome::Mock {
                    records: fallback(),
                    cause,
                }
            }
        }
    }
}

fn mock_count(limit: u32) -> usize {
    if limit == 0 {
        usize::MAX
    } else {
        limit as usize
    }
}
