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

pub mod client;
pub mod key;
pub mod keywords;

pub use client::{CompetitorAdClient, SerpAd, SerpConfig, SerpError};
pub use key::ApiKeyStore;
pub use keywords::parse_keywords;
