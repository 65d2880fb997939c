// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;

use serde_json::Value as JsonValue;

use crate::graph::NodeConfig;
use crate::table::{Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Single-key sort. Only the first entry of `sortColumns` is honored.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn from_node_config(config: &NodeConfig) -> Self {
        let first = config.get_array("sortColumns").and_then(|cols| cols.first());
        let text = move |key: &str| first.and_then(|c| c.get(key)).and_then(JsonValue::as_str);

        Self {
            column: text("column").map(str::to_string),
            direction: match text("direction") {
                Some("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            },
        }
    }

    /// Nulls come first in either direction; everything else compares by string form.
    fn compare(&self, column: &str, a: &Row, b: &Row) -> Ordering {
        let (a, b) = (a.get_or_null(column), b.get_or_null(column));
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                let ordering = a.to_string().cmp(&b.to_string());
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// Stable; without a sort column the input is returned as-is.
    pub fn apply(&self, input: &Table) -> Table {
        let mut sorted = input.clone();
        if let Some(column) = &self.column {
            sorted.sort_by(|a, b| self.compare(column, a, b));
        }
        sorted
    }
}
