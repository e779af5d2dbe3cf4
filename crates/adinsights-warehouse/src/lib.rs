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

pub mod access;
pub mod cache;
pub mod mock;
pub mod period;
pub mod query;
pub mod records;
pub mod table;

pub use access::AdInsights;
pub use cache::{CachePolicy, CachedInsights, QueryCache};
pub use mock::MockDataGenerator;
pub use period::{Category, CategoryFilter, Period};
pub use query::{BigQueryExecutor, QueryError, QueryErrorKind, QueryExecutor, Row, WarehouseConfig};
pub use records::{AdvertiserDomain, AdvertiserRecord, AdvertiserStats, FetchOutcome, NewAdvertiserRecord};
