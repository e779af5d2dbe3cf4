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

mod client;

use crate::oauth::{OAuthConfig, OAuthFlowController};
use crate::token::TokenStore;
use adinsights_common::storage::MemoryKeyValueStore;
use adinsights_common::util::MockClock;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub(super) struct Fixture {
    pub controller: OAuthFlowController,
    pub token_store: Arc<TokenStore>,
    pub clock: Arc<MockClock>,
}

pub(super) fn create_fixture(token_endpoint: &str) -> Fixture {
    let clock = Arc::new(MockClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()));
    let token_store = Arc::new(
        TokenStore::builder()
            .storage(Arc::new(MemoryKeyValueStore::new()))
            .clock(clock.clone())
            .build(),
    );
    let config = OAuthConfig::builder()
        .client_id("client-123.apps.googleusercontent.com")
        .client_secret("s3cret")
        .origin("https://insights.example.be")
        .token_endpoint(token_endpoint)
        .build();
    let controller = OAuthFlowController::new(config, token_store.clone()).expect("Failed to create controller");

    Fixture {
        controller,
        token_store,
        clock,
    }
}
