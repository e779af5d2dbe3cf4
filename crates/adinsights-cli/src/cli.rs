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

use adinsights_warehouse::table::SortField;
use adinsights_warehouse::{CategoryFilter, Period};
use clap::{Parser, Subcommand};

/// Belgian ad-spend insights from the Google Ads Transparency Center dataset
#[derive(Parser)]
#[command(name = "adinsights", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unlock the data commands with the configured shield credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Lock the data commands again
    Logout,

    /// Print the Google consent URL to open in a browser
    AuthUrl,

    /// Complete sign-in with the query string (or full URL) the browser was redirected to
    Callback {
        /// e.g. "?code=4/0Ab..." or "http://localhost:8080/oauth/callback?code=..."
        query: String,
    },

    /// Forget the stored Google access token
    SignOut,

    /// Show sign-in and login state
    Status,

    /// Top advertisers by spend
    Spend {
        #[arg(long, default_value = "30d")]
        period: Period,
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Headline advertiser, ad and spend totals
    Stats {
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Omit for totals over the whole dataset
        #[arg(long)]
        period: Option<Period>,
    },

    /// Advertisers that started running ads most recently
    NewAdvertisers {
        #[arg(long, default_value = "30d")]
        period: Period,
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        #[arg(long, default_value_t = 30)]
        limit: u32,
    },

    /// Sorted, paginated table of all advertisers
    Advertisers {
        #[arg(long, default_value = "1y")]
        period: Period,
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Maximum number of advertisers to fetch, 0 for no cap
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// name, category, spend or domain
        #[arg(long, default_value = "spend")]
        sort: SortField,
        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        page_size: usize,
        /// Attach guessed advertiser domains
        #[arg(long)]
        with_domains: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Advertiser names with guessed domains
    Domains,

    /// Search ads competitors run for keywords
    CompetitorAds {
        /// Comma or newline separated keywords
        #[arg(long)]
        keywords: String,
        #[arg(long, default_value = "BE")]
        region: String,
        /// Stored for later runs when given
        #[arg(long)]
        api_key: Option<String>,
    },
}
