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

use crate::cli::Commands;
use crate::config::Config;
use adinsights_auth::oauth::handle_callback;
use adinsights_auth::{CallbackRedirect, LoginShield, OAuthFlowController, StaticCredentialCheck, TokenStore};
use adinsights_common::storage::{FileKeyValueStore, KeyValueStore};
use adinsights_common::util::default_clock;
use adinsights_serp::{parse_keywords, ApiKeyStore, CompetitorAdClient, SerpConfig};
use adinsights_warehouse::table::{format_spend, AdvertiserTable, SortDirection, SortField};
use adinsights_warehouse::{
    AdInsights, AdvertiserDomain, AdvertiserRecord, BigQueryExecutor, CachedInsights, FetchOutcome, WarehouseConfig,
};
use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Wires the stores and services for one invocation.
pub struct App {
    config: Config,
    storage: Arc<dyn KeyValueStore>,
    token_store: Arc<TokenStore>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(
            FileKeyValueStore::open(&config.state_file)
                .with_context(|| format!("Failed to open state file {}", config.state_file.display()))?,
        );
        let token_store = Arc::new(TokenStore::new(storage.clone()));
        Ok(Self {
            config,
            storage,
            token_store,
        })
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { username, password } => self.login(&username, &password),
            Commands::Logout => {
                if let Some(shield) = self.shield() {
                    shield.logout()?;
                }
                println!("Logged out");
                Ok(())
            }
            Commands::AuthUrl => {
                println!("{}", self.oauth()?.build_authorization_url()?);
                Ok(())
            }
            Commands::Callback { query } => self.callback(&query).await,
            Commands::SignOut => {
                self.token_store.clear()?;
                println!("Signed out of Google");
                Ok(())
            }
            Commands::Status => self.status(),
            Commands::Spend { period, category } => {
                self.require_login()?;
                let outcome = self.insights()?.ad_spend(period, category).await;
                print_outcome(&outcome)
            }
            Commands::Stats { category, period } => {
                self.require_login()?;
                let outcome = self.insights()?.advertiser_stats(category, period).await;
                print_outcome(&outcome)
            }
            Commands::NewAdvertisers {
                period,
                category,
                limit,
            } => {
                self.require_login()?;
                let outcome = self.insights()?.new_advertisers(period, category, limit).await;
                print_outcome(&outcome)
            }
            Commands::Advertisers {
                period,
                category,
                limit,
                sort,
                ascending,
                page,
                page_size,
                with_domains,
                json,
            } => {
                self.require_login()?;
                let insights = self.insights()?;
                let outcome = insights.all_advertisers(period, category, limit).await;
                print_banner(&outcome);

                let domains = if with_domains {
                    lookup_domains(&insights).await
                } else {
                    Vec::new()
                };
                let table = build_table(&outcome, &domains, sort, ascending, page, page_size);

                if json {
                    print_json(&table.page_rows())
                } else {
                    print_table(&table);
                    Ok(())
                }
            }
            Commands::Domains => {
                self.require_login()?;
                let outcome = self.insights()?.advertiser_domains().await?;
                print_outcome(&outcome)
            }
            Commands::CompetitorAds {
                keywords,
                region,
                api_key,
            } => self.competitor_ads(&keywords, &region, api_key).await,
        }
    }

    fn shield(&self) -> Option<LoginShield> {
        let (username, password) = self.config.shield_credentials()?;
        let check = StaticCredentialCheck::builder()
            .username(username)
            .password(password)
            .build();
        Some(LoginShield::new(Arc::new(check), self.storage.clone()))
    }

    fn login(&self, username: &str, password: &str) -> Result<()> {
        let Some(shield) = self.shield() else {
            println!("No login shield configured");
            return Ok(());
        };
        shield.login(username, password)?;
        println!("Logged in");
        Ok(())
    }

    fn require_login(&self) -> Result<()> {
        match self.shield() {
            Some(shield) if !shield.is_logged_in() => bail!("Login required: run `adinsights login` first"),
            _ => Ok(()),
        }
    }

    fn oauth(&self) -> Result<OAuthFlowController> {
        Ok(OAuthFlowController::new(
            self.config.oauth_config()?,
            self.token_store.clone(),
        )?)
    }

    async fn callback(&self, query: &str) -> Result<()> {
        let controller = self.oauth()?;
        match handle_callback(&controller, query).await {
            CallbackRedirect::AuthSuccess => {
                println!("Signed in with Google");
                Ok(())
            }
            CallbackRedirect::OAuthError(reason) => bail!("Google returned an error: {}", reason),
            CallbackRedirect::AuthFailed => bail!("Exchanging the authorization code failed"),
            CallbackRedirect::NoCode => bail!("No authorization code found in '{}'", query),
        }
    }

    fn status(&self) -> Result<()> {
        let login = match self.shield() {
            None => "not configured",
            Some(shield) if shield.is_logged_in() => "logged in",
            Some(_) => "logged out",
        };
        let google = if self.token_store.is_valid() {
            "signed in"
        } else {
            "signed out"
        };
        println!("Login shield:  {}", login);
        println!("Google:        {}", google);
        println!("Project:       {}", self.config.project_id);
        Ok(())
    }

    fn insights(&self) -> Result<CachedInsights> {
        let warehouse = WarehouseConfig::builder()
            .project_id(self.config.project_id.as_str())
            .build();
        let executor = BigQueryExecutor::new(warehouse, self.token_store.clone())?;
        Ok(CachedInsights::new(
            AdInsights::new(Arc::new(executor)),
            self.token_store.clone(),
            default_clock(),
        ))
    }

    async fn competitor_ads(&self, keywords: &str, region: &str, api_key: Option<String>) -> Result<()> {
        self.require_login()?;
        let keys = ApiKeyStore::new(self.storage.clone());
        if let Some(api_key) = api_key.as_deref().filter(|k| !k.is_empty()) {
            keys.save(api_key)?;
            info!("Search API key stored");
        }
        let Some(api_key) = keys.get().or_else(|| self.config.valueserp_api_key.clone()) else {
            bail!("Please enter your ValueSERP API key (--api-key or VALUESERP_API_KEY)");
        };

        let keywords = parse_keywords(keywords);
        if keywords.is_empty() {
            bail!("Please enter at least one keyword");
        }

        let client = CompetitorAdClient::new(SerpConfig::builder().api_key(api_key).build())?;
        let ads = client.search_ads(&keywords, region).await?;
        print_json(&ads)
    }
}

/// Domains for the advertiser table; a failed lookup leaves the domain column empty.
async fn lookup_domains(insights: &CachedInsights) -> Vec<AdvertiserDomain> {
    match insights.advertiser_domains().await {
        Ok(outcome) => outcome.records().to_vec(),
        Err(e) => {
            warn!("Advertiser domain lookup failed, showing the table without domains: {}", e);
            Vec::new()
        }
    }
}

fn build_table(
    outcome: &FetchOutcome<AdvertiserRecord>,
    domains: &[AdvertiserDomain],
    sort: SortField,
    ascending: bool,
    page: usize,
    page_size: usize,
) -> AdvertiserTable {
    let direction = if ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    let mut table = AdvertiserTable::new(outcome, domains);
    table.set_sort(sort, direction);
    table.set_page_size(page_size);
    table.set_page(page);
    table
}

fn print_banner<T>(outcome: &FetchOutcome<T>) {
    if let Some(banner) = outcome.banner() {
        eprintln!("{}", banner);
    }
}

fn print_outcome<T: Serialize>(outcome: &FetchOutcome<T>) -> Result<()> {
    print_banner(outcome);
    print_json(outcome)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table(table: &AdvertiserTable) {
    let (field, direction) = table.sort();
    let arrow = match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    println!(
        "{:<40} {:<12} {:>10} {:>6}  {}",
        "ADVERTISER", "CATEGORY", "SPEND", "ADS", "DOMAIN"
    );
    for row in table.page_rows() {
        println!(
            "{:<40} {:<12} {:>10} {:>6}  {}",
            truncate(&row.name, 40),
            row.category,
            format_spend(row.spend),
            row.ads,
            row.domain.as_deref().unwrap_or("-")
        );
    }
    println!(
        "Page {} of {} ({} advertisers, sorted by {:?} {})",
        table.page(),
        table.total_pages().max(1),
        table.len(),
        field,
        arrow
    );
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(width.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
