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

use crate::mock::{retained_count, MockDataGenerator, GENERAL_MIX, NEW_ADVERTISER_MIX};
use crate::period::{Category, CategoryFilter, Period};
use rstest::rstest;

#[rstest]
#[case(0.0, Category::Commercial)]
#[case(0.69, Category::Commercial)]
#[case(0.70, Category::Political)]
#[case(0.89, Category::Political)]
#[case(0.90, Category::Nonprofit)]
#[case(0.999, Category::Nonprofit)]
fn test_general_category_draw(#[case] roll: f64, #[case] expected: Category) {
    assert_eq!(GENERAL_MIX.draw(roll), expected);
}

#[rstest]
#[case(0.59, Category::Commercial)]
#[case(0.60, Category::Political)]
#[case(0.84, Category::Political)]
#[case(0.85, Category::Nonprofit)]
fn test_new_advertiser_category_draw(#[case] roll: f64, #[case] expected: Category) {
    assert_eq!(NEW_ADVERTISER_MIX.draw(roll), expected);
}

#[test]
fn test_political_seven_days_keeps_rounded_share_of_political_pool() {
    let pool = MockDataGenerator::with_seed(42).ad_spend_pool(50);
    let political = pool.iter().filter(|r| r.category == "political").count();

    let records = MockDataGenerator::with_seed(42).ad_spend(50, Period::SevenDays, CategoryFilter::Only(Category::Political));

    assert!(records.iter().all(|r| r.category == "political"));
    assert_eq!(records.len(), retained_count(political, 0.3));
}

#[test]
fn test_filter_then_scale_takes_prefix() {
    let pool = MockDataGenerator::with_seed(7).ad_spend_pool(50);
    let commercial: Vec<_> = pool.into_iter().filter(|r| r.category == "commercial").collect();

    let records =
        MockDataGenerator::with_seed(7).ad_spend(50, Period::ThirtyDays, CategoryFilter::Only(Category::Commercial));

    assert_eq!(records.as_slice(), &commercial[..retained_count(commercial.len(), 0.6)]);
}

#[rstest]
#[case(Period::SevenDays, 15)]
#[case(Period::ThirtyDays, 30)]
#[case(Period::NinetyDays, 40)]
#[case(Period::OneYear, 50)]
#[case(Period::YearToDate, 50)]
fn test_general_period_scaling(#[case] period: Period, #[case] expected: usize) {
    let records = MockDataGenerator::with_seed(1).ad_spend(50, period, CategoryFilter::All);

    assert_eq!(records.len(), expected);
}

#[rstest]
#[case(Period::SevenDays, 6)]
#[case(Period::ThirtyDays, 15)]
#[case(Period::NinetyDays, 21)]
#[case(Period::OneYear, 30)]
fn test_new_advertiser_period_scaling(#[case] period: Period, #[case] expected: usize) {
    let records = MockDataGenerator::with_seed(1).new_advertisers(100, period, CategoryFilter::All);

    assert_eq!(records.len(), expected);
}

#[test]
fn test_pool_is_capped() {
    let generator = MockDataGenerator::with_seed(3);

    assert_eq!(generator.ad_spend_pool(500).len(), 50);
    assert_eq!(generator.ad_spend_pool(12).len(), 12);
    assert_eq!(generator.new_advertiser_pool(500).len(), 30);
}

#[test]
fn test_names_ids_and_dates() {
    let generator = MockDataGenerator::with_seed(11);

    for (index, record) in generator.ad_spend_pool(20).iter().enumerate() {
        let n = index + 1;
        let category = record.category.as_str();
        let title = format!("{}{}", category[..1].to_uppercase(), &category[1..]);
        assert_eq!(record.name, format!("Mock {} Advertiser {}", title, n));
        assert_eq!(record.advertiser_id, format!("mock_adv_{}_{}", category, n));
        assert_eq!(record.region, "BE");
        assert!(record.first_ad_date.starts_with("2025-0"));
        assert!(record.first_ad_date <= record.last_ad_date);
        assert!(record.total_spend >= 400.0);
    }

    for record in generator.new_advertiser_pool(10) {
        assert!(record.name.starts_with("Mock New "));
        assert!(record.advertiser_id.starts_with("new_adv_"));
        assert!(record.max_spend >= 250.0);
    }
}

#[test]
fn test_same_seed_is_reproducible() {
    let first = MockDataGenerator::with_seed(99).ad_spend(50, Period::OneYear, CategoryFilter::All);
    let second = MockDataGenerator::with_seed(99).ad_spend(50, Period::OneYear, CategoryFilter::All);

    assert_eq!(first, second);
}

#[test]
fn test_stats_per_category() {
    let generator = MockDataGenerator::with_seed(0);

    let political = generator.advertiser_stats(CategoryFilter::Only(Category::Political));
    assert_eq!(political.total_advertisers, 80);
    assert_eq!(political.total_ads, 1200);
    assert_eq!(political.total_spend, 160_000.0);

    let all = generator.advertiser_stats(CategoryFilter::All);
    assert_eq!(all.total_advertisers, 540);
    assert_eq!(all.total_ads, 10_000);
    assert_eq!(all.total_spend, 540.0 * 1933.0);
}
