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

mod normalize;

use crate::query::{BigQueryExecutor, WarehouseConfig};
use adinsights_auth::TokenStore;
use adinsights_common::storage::MemoryKeyValueStore;
use adinsights_common::util::MockClock;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub(super) const QUERY_PATH: &str = "/projects/test-project/queries";

pub(super) struct Fixture {
    pub executor: BigQueryExecutor,
    pub token_store: Arc<TokenStore>,
}

/// Executor pointed at `api_base`, optionally holding a token valid for one hour.
pub(super) fn create_fixture(api_base: &str, token: Option<&str>) -> Fixture {
    let clock = Arc::new(MockClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()));
    let token_store = Arc::new(
        TokenStore::builder()
            .storage(Arc::new(MemoryKeyValueStore::new()))
            .clock(clock)
            .build(),
    );
    if let Some(token) = token {
        token_store.save_token(token, 3600).unwrap();
    }
    let config = WarehouseConfig::builder()
        .project_id("test-project")
        .api_base(api_base)
        .build();
    let executor = BigQueryExecutor::new(config, token_store.clone()).expect("Failed to create executor");

    Fixture { executor, token_store }
}
