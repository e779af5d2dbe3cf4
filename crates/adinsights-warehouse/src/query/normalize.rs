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

use super::Row;
use serde::Deserialize;
use serde_json::Value;

/// Successful query response in the warehouse's columnar shape.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub rows: Option<Vec<TableRow>>,
    #[serde(default)]
    pub schema: Option<TableSchema>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub v: Value,
}

#[derive(Debug, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<TableField>,
}

#[derive(Debug, Deserialize)]
pub struct TableField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
}

/// Zips every row's cells with the schema field names, preserving schema order.
///
/// Values are passed through untouched. A response without rows or without a schema yields no rows; cells beyond
/// the last schema field are dropped.
pub fn normalize(response: QueryResponse) -> Vec<Row> {
    let (Some(rows), Some(schema)) = (response.rows, response.schema) else {
        return Vec::new();
    };

    rows.into_iter()
        .map(|row| {
            schema
                .fields
                .iter()
                .zip(row.f)
                .map(|(field, cell)| (field.name.clone(), cell.v))
                .collect::<Row>()
        })
        .collect()
}
