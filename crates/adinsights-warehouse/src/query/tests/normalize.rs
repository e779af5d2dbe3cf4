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

use crate::query::normalize::{normalize, QueryResponse};
use serde_json::json;

fn parse(value: serde_json::Value) -> QueryResponse {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_single_row_in_schema_order() {
    let response = parse(json!({
        "schema": { "fields": [ { "name": "a" }, { "name": "b" } ] },
        "rows": [ { "f": [ { "v": 1 }, { "v": "x" } ] } ]
    }));

    let rows = normalize(response);

    assert_eq!(rows.len(), 1);
    assert_eq!(serde_json::Value::Object(rows[0].clone()), json!({ "a": 1, "b": "x" }));
    assert_eq!(rows[0].keys().cloned().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_schema_order_is_kept_when_not_alphabetical() {
    let response = parse(json!({
        "schema": { "fields": [ { "name": "zeta" }, { "name": "alpha" } ] },
        "rows": [ { "f": [ { "v": "z" }, { "v": "a" } ] } ]
    }));

    let rows = normalize(response);

    assert_eq!(rows[0].keys().cloned().collect::<Vec<_>>(), ["zeta", "alpha"]);
}

#[test]
fn test_values_are_not_coerced() {
    let response = parse(json!({
        "schema": { "fields": [ { "name": "total_spend", "type": "FLOAT" }, { "name": "note" } ] },
        "rows": [ { "f": [ { "v": "1250.5" }, { "v": null } ] } ]
    }));

    let rows = normalize(response);

    assert_eq!(rows[0]["total_spend"], json!("1250.5"));
    assert_eq!(rows[0]["note"], json!(null));
}

#[test]
fn test_missing_rows_or_schema_yield_nothing() {
    assert!(normalize(parse(json!({ "schema": { "fields": [ { "name": "a" } ] } }))).is_empty());
    assert!(normalize(parse(json!({ "rows": [ { "f": [ { "v": 1 } ] } ] }))).is_empty());
    assert!(normalize(parse(json!({}))).is_empty());
}
