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

//! Sortable, paginated view over advertiser records.

#[cfg(test)]
mod tests;

use crate::records::{AdvertiserDomain, AdvertiserRecord, FetchOutcome};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserRow {
    pub name: String,
    pub advertiser_id: String,
    pub category: String,
    pub spend: f64,
    pub ads: u64,
    pub first_ad_date: String,
    pub last_ad_date: String,
    pub region: String,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Category,
    Spend,
    Domain,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "category" => Ok(SortField::Category),
            "spend" => Ok(SortField::Spend),
            "domain" => Ok(SortField::Domain),
            other => Err(format!(
                "Unknown sort field '{}', expected name, category, spend or domain",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdvertiserTable {
    rows: Vec<AdvertiserRow>,
    sort_field: SortField,
    sort_direction: SortDirection,
    page_size: usize,
    page: usize,
}

impl AdvertiserTable {
    /// Builds rows from `outcome`, attaching the domain whose advertiser name matches.
    pub fn new(outcome: &FetchOutcome<AdvertiserRecord>, domains: &[AdvertiserDomain]) -> Self {
        let by_name: HashMap<&str, &str> = domains.iter().map(|d| (d.name.as_str(), d.url.as_str())).collect();
        let rows = outcome
            .records()
            .iter()
            .map(|record| AdvertiserRow {
                domain: by_name.get(record.name.as_str()).map(|url| url.to_string()),
                name: record.name.clone(),
                advertiser_id: record.advertiser_id.clone(),
                category: record.category.clone(),
                spend: record.total_spend,
                ads: record.total_ads,
                first_ad_date: record.first_ad_date.clone(),
                last_ad_date: record.last_ad_date.clone(),
                region: record.region.clone(),
            })
            .collect();

        Self {
            rows,
            sort_field: SortField::Spend,
            sort_direction: SortDirection::Descending,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    /// Selecting the active field flips the direction; a new field starts descending. Returns to page 1.
    pub fn sort_by(&mut self, field: SortField) {
        if field == self.sort_field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Descending;
        }
        self.page = 1;
    }

    /// Sorts by `field` in `direction` regardless of the current sort. Returns to page 1.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.sort_direction = direction;
        self.page = 1;
    }

    pub fn sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    /// Sets the page size (at least 1) and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Moves to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Rows of the current page in sort order.
    pub fn page_rows(&self) -> Vec<&AdvertiserRow> {
        self.sorted()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn sorted(&self) -> Vec<&AdvertiserRow> {
        let mut rows: Vec<&AdvertiserRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_field);
            match self.sort_direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }
}

fn compare(a: &AdvertiserRow, b: &AdvertiserRow, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortField::Spend => a.spend.total_cmp(&b.spend),
        SortField::Domain => {
            let left = a.domain.as_deref().unwrap_or_default().to_lowercase();
            let right = b.domain.as_deref().unwrap_or_default().to_lowercase();
            left.cmp(&right)
        }
    }
}

/// Renders spend as euros, abbreviating thousands with one decimal (`€12.3K`).
pub fn format_spend(spend: f64) -> String {
    if spend >= 1000.0 {
        format!("€{:.1}K", spend / 1000.0)
    } else {
        let rounded = format!("{:.1}", spend);
        format!("€{}", rounded.strip_suffix(".0").unwrap_or(&rounded))
    }
}
