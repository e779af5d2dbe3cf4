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

//! Query text for the Belgian slice of the public ads transparency dataset.

pub const SOURCE_TABLE: &str = "`bigquery-public-data.google_ads_transparency_center.creative_stats`";
pub const SPEND_LIMIT: u32 = 50;
pub const DOMAIN_LIMIT: u32 = 50;

/// Restricts `region.first_shown` to the last `days` days; `None` leaves the window open.
pub fn window_filter(days: Option<i64>) -> String {
    match days {
        Some(days) => format!(
            "AND CAST(region.first_shown AS DATE) >= DATE_SUB(CURRENT_DATE(), INTERVAL {} DAY)",
            days
        ),
        None => String::new(),
    }
}

fn limit_clause(limit: u32) -> String {
    if limit > 0 {
        format!("LIMIT {}", limit)
    } else {
        String::new()
    }
}

fn per_advertiser_totals(days: i64, order_by: &str, limit: u32) -> String {
    format!(
        "SELECT
  advertiser_disclosed_name AS advertiser_name,
  advertiser_id,
  topic AS category,
  SUM(CAST(times_shown_upper_bound AS FLOAT64)) AS total_spend,
  COUNT(DISTINCT creative_id) AS total_ads,
  MIN(first_shown) AS first_ad_date,
  MAX(last_shown) AS last_ad_date
FROM (
  SELECT advertiser_disclosed_name, advertiser_id, creative_id, topic,
    region.times_shown_upper_bound AS times_shown_upper_bound,
    region.first_shown AS first_shown,
    region.last_shown AS last_shown
  FROM {table},
    UNNEST(region_stats) AS region
  WHERE region.region_code = 'BE'
    AND advertiser_location = 'BE'
    {window}
  GROUP BY advertiser_disclosed_name, advertiser_id, creative_id, topic,
    region.times_shown_upper_bound, region.first_shown, region.last_shown
)
GROUP BY advertiser_disclosed_name, advertiser_id, category
HAVING total_spend > 0
ORDER BY {order_by}
{limit}",
        table = SOURCE_TABLE,
        window = window_filter(Some(days)),
        order_by = order_by,
        limit = limit_clause(limit),
    )
}

/// Top advertisers by spend.
pub fn ad_spend_query(days: i64) -> String {
    per_advertiser_totals(days, "total_spend DESC", SPEND_LIMIT)
}

/// Every advertiser alphabetically; a `limit` of zero means no cap.
pub fn all_advertisers_query(days: i64, limit: u32) -> String {
    per_advertiser_totals(days, "advertiser_name ASC", limit)
}

pub fn stats_query(days: Option<i64>) -> String {
    format!(
        "SELECT
  COUNT(DISTINCT advertiser_id) AS total_advertisers,
  COUNT(DISTINCT creative_id) AS total_ads,
  SUM(CAST(times_shown_upper_bound AS FLOAT64)) AS total_spend
FROM (
  SELECT advertiser_id, creative_id, region.times_shown_upper_bound AS times_shown_upper_bound
  FROM {table},
    UNNEST(region_stats) AS region
  WHERE region.region_code = 'BE'
    AND advertiser_location = 'BE'
    {window}
  GROUP BY advertiser_id, creative_id, region.times_shown_upper_bound
)",
        table = SOURCE_TABLE,
        window = window_filter(days),
    )
}

/// Most recently started advertisers first.
pub fn new_advertisers_query(days: i64, limit: u32) -> String {
    format!(
        "SELECT
  advertiser_disclosed_name AS advertiser_name,
  advertiser_id,
  topic AS category,
  MIN(first_shown) AS first_ad_date,
  COUNT(DISTINCT creative_id) AS total_ads,
  MAX(CAST(times_shown_upper_bound AS FLOAT64)) AS max_spend
FROM (
  SELECT advertiser_disclosed_name, advertiser_id, creative_id, topic,
    region.times_shown_upper_bound AS times_shown_upper_bound,
    region.first_shown AS first_shown
  FROM {table},
    UNNEST(region_stats) AS region
  WHERE region.region_code = 'BE'
    AND advertiser_location = 'BE'
    {window}
  GROUP BY advertiser_disclosed_name, advertiser_id, creative_id, topic,
    region.times_shown_upper_bound, region.first_shown
)
GROUP BY advertiser_disclosed_name, advertiser_id, category
HAVING max_spend > 0
ORDER BY first_ad_date DESC
{limit}",
        table = SOURCE_TABLE,
        window = window_filter(Some(days)),
        limit = limit_clause(limit),
    )
}

pub fn domains_query() -> String {
    format!(
        "SELECT DISTINCT
  advertiser_disclosed_name AS advertiser_name,
  advertiser_id
FROM {table},
  UNNEST(region_stats) AS region
WHERE region.region_code = 'BE'
LIMIT {limit}",
        table = SOURCE_TABLE,
        limit = DOMAIN_LIMIT,
    )
}
