// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory tabular model exchanged between every pipeline stage.

mod row;
mod value;

pub use row::Row;
pub use value::Value;

use serde::Serialize;

/// Rows in display order. Only sort guarantees an order.
pub type Table = Vec<Row>;

/// One column as reported by a connector's schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
        }
    }
}
