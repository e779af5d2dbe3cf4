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

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Year-to-date windows are only computed for this year; any other year falls back to a full year.
const YTD_REFERENCE_YEAR: i32 = 2025;
const FULL_YEAR_DAYS: i64 = 365;

/// Relative date window selected by a period token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    OneYear,
    YearToDate,
}

impl Period {
    /// Maps a period token to a window. Unknown tokens select a full year.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "7d" => Period::SevenDays,
            "30d" => Period::ThirtyDays,
            "90d" => Period::NinetyDays,
            "ytd" => Period::YearToDate,
            _ => Period::OneYear,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Period::SevenDays => "7d",
            Period::ThirtyDays => "30d",
            Period::NinetyDays => "90d",
            Period::OneYear => "1y",
            Period::YearToDate => "ytd",
        }
    }

    /// Number of days the window reaches back from `today`.
    pub fn day_count(&self, today: NaiveDate) -> i64 {
        match self {
            Period::SevenDays => 7,
            Period::ThirtyDays => 30,
            Period::NinetyDays => 90,
            Period::OneYear => FULL_YEAR_DAYS,
            Period::YearToDate if today.year() == YTD_REFERENCE_YEAR => {
                NaiveDate::from_ymd_opt(YTD_REFERENCE_YEAR, 1, 1)
                    .map(|jan_first| (today - jan_first).num_days())
                    .unwrap_or(FULL_YEAR_DAYS)
            }
            Period::YearToDate => FULL_YEAR_DAYS,
        }
    }
}

impl FromStr for Period {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Period::parse(s))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Advertiser category used by the synthetic data path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Commercial,
    Political,
    Nonprofit,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Commercial, Category::Political, Category::Nonprofit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Commercial => "commercial",
            Category::Political => "political",
            Category::Nonprofit => "nonprofit",
        }
    }

    /// Capitalized form used in synthetic advertiser names.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Commercial => "Commercial",
            Category::Political => "Political",
            Category::Nonprofit => "Nonprofit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selection requested by the caller.
///
/// The warehouse dataset has no category column, so only the synthetic data path honours a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "commercial" => Ok(CategoryFilter::Only(Category::Commercial)),
            "political" => Ok(CategoryFilter::Only(Category::Political)),
            "nonprofit" => Ok(CategoryFilter::Only(Category::Nonprofit)),
            other => Err(format!(
                "Unknown category '{}', expected all, commercial, political or nonprofit",
                other
            )),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
