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

//! Synthetic advertiser data shown when the warehouse cannot be queried.
//!
//! Output mimics the real datasets: commercial advertisers dominate and spend more, and shorter periods return
//! fewer advertisers. The category filter is applied before the period scaling.

#[cfg(test)]
mod tests;

use crate::period::{Category, CategoryFilter, Period};
use crate::records::{AdvertiserRecord, AdvertiserStats, NewAdvertiserRecord, REGION_CODE};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

pub const GENERAL_POOL_CAP: usize = 50;
pub const NEW_ADVERTISER_POOL_CAP: usize = 30;

/// Cumulative category probabilities; nonprofit takes the remainder.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMix {
    pub commercial: f64,
    pub political: f64,
}

impl CategoryMix {
    /// Maps a uniform roll in `[0, 1)` to a category.
    pub fn draw(&self, roll: f64) -> Category {
        if roll < self.commercial {
            Category::Commercial
        } else if roll < self.commercial + self.political {
            Category::Political
        } else {
            Category::Nonprofit
        }
    }
}

pub const GENERAL_MIX: CategoryMix = CategoryMix {
    commercial: 0.70,
    political: 0.20,
};

pub const NEW_ADVERTISER_MIX: CategoryMix = CategoryMix {
    commercial: 0.60,
    political: 0.25,
};

fn general_spend_multiplier(category: Category) -> f64 {
    match category {
        Category::Commercial => 1.5,
        Category::Political => 0.8,
        Category::Nonprofit => 0.4,
    }
}

fn new_advertiser_spend_multiplier(category: Category) -> f64 {
    match category {
        Category::Commercial => 1.3,
        Category::Political => 0.7,
        Category::Nonprofit => 0.5,
    }
}

/// Share of the general pool kept for a period.
pub fn general_retention(period: Period) -> f64 {
    match period {
        Period::SevenDays => 0.3,
        Period::ThirtyDays => 0.6,
        Period::NinetyDays => 0.8,
        Period::OneYear | Period::YearToDate => 1.0,
    }
}

/// Share of the new-advertiser pool kept for a period.
pub fn new_advertiser_retention(period: Period) -> f64 {
    match period {
        Period::SevenDays => 0.2,
        Period::ThirtyDays => 0.5,
        Period::NinetyDays => 0.7,
        Period::OneYear | Period::YearToDate => 1.0,
    }
}

pub fn retained_count(len: usize, ratio: f64) -> usize {
    (len as f64 * ratio).round() as usize
}

struct StatsBaseline {
    advertisers: u64,
    ads: u64,
    avg_spend: f64,
}

fn stats_baseline(category: Category) -> StatsBaseline {
    match category {
        Category::Commercial => StatsBaseline {
            advertisers: 400,
            ads: 8000,
            avg_spend: 3000.0,
        },
        Category::Political => StatsBaseline {
            advertisers: 80,
            ads: 1200,
            avg_spend: 2000.0,
        },
        Category::Nonprofit => StatsBaseline {
            advertisers: 60,
            ads: 800,
            avg_spend: 800.0,
        },
    }
}

/// Produces synthetic records from an injectable random source.
pub struct MockDataGenerator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Default for MockDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataGenerator {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Unfiltered spend pool of `min(count, 50)` advertisers.
    pub fn ad_spend_pool(&self, count: usize) -> Vec<AdvertiserRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (1..=count.min(GENERAL_POOL_CAP))
            .map(|n| {
                let category = GENERAL_MIX.draw(rng.random_range(0.0..1.0));
                let multiplier = general_spend_multiplier(category);
                let (first_ad_date, last_ad_date) = date_range(&mut *rng);
                AdvertiserRecord {
                    name: format!("Mock {} Advertiser {}", category.title(), n),
                    advertiser_id: format!("mock_adv_{}_{}", category.as_str(), n),
                    category: category.as_str().to_string(),
                    total_spend: (rng.random_range(1000.0..51000.0) * multiplier).round(),
                    total_ads: rng.random_range(1..=100),
                    first_ad_date,
                    last_ad_date,
                    region: REGION_CODE.to_string(),
                }
            })
            .collect()
    }

    pub fn ad_spend(&self, count: usize, period: Period, filter: CategoryFilter) -> Vec<AdvertiserRecord> {
        let pool = self.ad_spend_pool(count);
        let selected = select(pool, |r| r.category.as_str(), filter, general_retention(period));
        debug!(
            "Generated {} mock spend records for period {} and category {}",
            selected.len(),
            period,
            filter
        );
        selected
    }

    /// Unfiltered pool of `min(count, 30)` new advertisers.
    pub fn new_advertiser_pool(&self, count: usize) -> Vec<NewAdvertiserRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (1..=count.min(NEW_ADVERTISER_POOL_CAP))
            .map(|n| {
                let category = NEW_ADVERTISER_MIX.draw(rng.random_range(0.0..1.0));
                let multiplier = new_advertiser_spend_multiplier(category);
                let (first_ad_date, _) = date_range(&mut *rng);
                NewAdvertiserRecord {
                    name: format!("Mock New {} Advertiser {}", category.title(), n),
                    advertiser_id: format!("new_adv_{}_{}", category.as_str(), n),
                    category: category.as_str().to_string(),
                    first_ad_date,
                    total_ads: (rng.random_range(1.0..51.0) * multiplier).round() as u64,
                    max_spend: (rng.random_range(500.0..10500.0) * multiplier).round(),
                }
            })
            .collect()
    }

    pub fn new_advertisers(&self, count: usize, period: Period, filter: CategoryFilter) -> Vec<NewAdvertiserRecord> {
        let pool = self.new_advertiser_pool(count);
        let selected = select(pool, |r| r.category.as_str(), filter, new_advertiser_retention(period));
        debug!(
            "Generated {} mock new advertisers for period {} and category {}",
            selected.len(),
            period,
            filter
        );
        selected
    }

    /// Deterministic headline figures; "all" sums counts and averages the per-category average spend.
    pub fn advertiser_stats(&self, filter: CategoryFilter) -> AdvertiserStats {
        let (advertisers, ads, avg_spend) = match filter {
            CategoryFilter::Only(category) => {
                let baseline = stats_baseline(category);
                (baseline.advertisers, baseline.ads, baseline.avg_spend)
            }
            CategoryFilter::All => {
                let baselines: Vec<StatsBaseline> = Category::ALL.iter().map(|c| stats_baseline(*c)).collect();
                let avg = baselines.iter().map(|b| b.avg_spend).sum::<f64>() / baselines.len() as f64;
                (
                    baselines.iter().map(|b| b.advertisers).sum(),
                    baselines.iter().map(|b| b.ads).sum(),
                    avg.round(),
                )
            }
        };

        AdvertiserStats {
            total_advertisers: advertisers,
            total_ads: ads,
            total_spend: advertisers as f64 * avg_spend,
        }
    }
}

fn select<T>(pool: Vec<T>, category_of: impl Fn(&T) -> &str, filter: CategoryFilter, ratio: f64) -> Vec<T> {
    let filtered: Vec<T> = match filter {
        CategoryFilter::All => pool,
        CategoryFilter::Only(category) => pool
            .into_iter()
            .filter(|record| category_of(record) == category.as_str())
            .collect(),
    };
    let keep = retained_count(filtered.len(), ratio);
    filtered.into_iter().take(keep).collect()
}

/// A first and last ad date in the first half of 2025, first <= last.
fn date_range(rng: &mut dyn RngCore) -> (String, String) {
    let first_month = rng.random_range(1..=6);
    let first_day = rng.random_range(1..=28);
    let last_month = rng.random_range(first_month..=6);
    let last_day = if last_month == first_month {
        rng.random_range(first_day..=28)
    } else {
        rng.random_range(1..=28)
    };
    (
        format!("2025-{:02}-{:02}", first_month, first_day),
        format!("2025-{:02}-{:02}", last_month, last_day),
    )
}
