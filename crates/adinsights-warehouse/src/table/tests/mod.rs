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

use crate::records::{AdvertiserDomain, AdvertiserRecord, FetchOutcome};
use crate::table::{format_spend, AdvertiserTable, SortDirection, SortField};
use rstest::rstest;

fn record(name: &str, category: &str, spend: f64) -> AdvertiserRecord {
    AdvertiserRecord {
        name: name.to_string(),
        advertiser_id: format!("id_{}", name),
        category: category.to_string(),
        total_spend: spend,
        total_ads: 1,
        first_ad_date: "2025-01-01".to_string(),
        last_ad_date: "2025-02-01".to_string(),
        region: "BE".to_string(),
    }
}

fn create_table() -> AdvertiserTable {
    let outcome = FetchOutcome::Live(vec![
        record("bpost", "commercial", 1200.0),
        record("Argenta", "commercial", 900.0),
        record("Vooruit", "political", 5000.0),
    ]);
    let domains = vec![AdvertiserDomain {
        name: "Argenta".to_string(),
        advertiser_id: "id_Argenta".to_string(),
        url: "argenta.be".to_string(),
    }];
    AdvertiserTable::new(&outcome, &domains)
}

fn names(table: &AdvertiserTable) -> Vec<String> {
    table.page_rows().iter().map(|r| r.name.clone()).collect()
}

#[test]
fn test_default_sort_is_spend_descending() {
    let table = create_table();

    assert_eq!(table.sort(), (SortField::Spend, SortDirection::Descending));
    assert_eq!(names(&table), ["Vooruit", "bpost", "Argenta"]);
}

#[test]
fn test_reselecting_field_toggles_direction() {
    let mut table = create_table();

    table.sort_by(SortField::Spend);

    assert_eq!(table.sort(), (SortField::Spend, SortDirection::Ascending));
    assert_eq!(names(&table), ["Argenta", "bpost", "Vooruit"]);
}

#[test]
fn test_new_field_starts_descending_and_is_case_insensitive() {
    let mut table = create_table();

    table.sort_by(SortField::Name);
    assert_eq!(names(&table), ["Vooruit", "bpost", "Argenta"]);

    table.sort_by(SortField::Name);
    assert_eq!(names(&table), ["Argenta", "bpost", "Vooruit"]);
}

#[test]
fn test_set_sort_is_absolute() {
    let mut table = create_table();
    table.set_page_size(1);
    table.set_page(2);

    table.set_sort(SortField::Spend, SortDirection::Descending);
    assert_eq!(table.sort(), (SortField::Spend, SortDirection::Descending));
    assert_eq!(table.page(), 1);

    table.set_sort(SortField::Spend, SortDirection::Ascending);
    table.set_page_size(3);
    assert_eq!(names(&table), ["Argenta", "bpost", "Vooruit"]);
}

#[test]
fn test_domains_are_matched_by_name() {
    let mut table = create_table();
    table.sort_by(SortField::Domain);

    let rows = table.page_rows();

    assert_eq!(rows[0].domain.as_deref(), Some("argenta.be"));
    assert!(rows[1..].iter().all(|r| r.domain.is_none()));
}

#[test]
fn test_pagination() {
    let mut table = create_table();
    table.set_page_size(2);

    assert_eq!(table.total_pages(), 2);
    assert_eq!(names(&table), ["Vooruit", "bpost"]);

    table.set_page(2);
    assert_eq!(names(&table), ["Argenta"]);

    table.set_page(9);
    assert_eq!(table.page(), 2);

    table.sort_by(SortField::Category);
    assert_eq!(table.page(), 1);
}

#[test]
fn test_no_data_gives_empty_table() {
    let table = AdvertiserTable::new(&FetchOutcome::NoData, &[]);

    assert!(table.is_empty());
    assert_eq!(table.total_pages(), 0);
    assert!(table.page_rows().is_empty());
}

#[rstest]
#[case(512.0, "€512")]
#[case(512.46, "€512.5")]
#[case(999.0, "€999")]
#[case(1000.0, "€1.0K")]
#[case(12345.0, "€12.3K")]
fn test_format_spend(#[case] spend: f64, #[case] expected: &str) {
    assert_eq!(format_spend(spend), expected);
}
