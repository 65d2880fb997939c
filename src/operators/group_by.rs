// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::graph::NodeConfig;
use crate::observability::messages::operator::{GroupByPassThrough, UnknownAggregation};
use crate::observability::messages::StructuredLog;
use crate::table::{Row, Table, Value};

const KEY_SEPARATOR: char = '|';

/// One aggregate output column.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub function: String,
    pub column: Option<String>,
    pub alias: String,
}

impl Aggregation {
    fn from_json(entry: &JsonValue) -> Self {
        let text = |key: &str| entry.get(key).and_then(JsonValue::as_str).map(str::to_string);
        let function = text("function").unwrap_or_default();
        let column = text("column");
        let alias = text("alias").unwrap_or_else(|| {
            format!("{}_{}", function, column.as_deref().unwrap_or("null"))
        });
        Self {
            function,
            column,
            alias,
        }
    }

    /// `sum` and `avg` treat missing and unparsable values as zero.
    /// `min` and `max` compare string forms and ignore nulls.
    pub fn evaluate(&self, rows: &[&Row]) -> Value {
        let column = self.column.as_deref().unwrap_or_default();
        let numbers = move || {
            rows.iter()
                .map(move |row| row.get_or_null(column).as_f64().unwrap_or(0.0))
        };
        let present = move || {
            rows.iter()
                .map(move |row| row.get_or_null(column))
                .filter(|value| !value.is_null())
        };

        match self.function.to_lowercase().as_str() {
            "count" => Value::Int(rows.len() as i64),
            "sum" => Value::Float(numbers().sum()),
            "avg" if rows.is_empty() => Value::Float(0.0),
            "avg" => Value::Float(numbers().sum::<f64>() / rows.len() as f64),
            "min" => present()
                .fold(None::<&Value>, |best, value| match best {
                    Some(b) if b.to_string() <= value.to_string() => Some(b),
                    _ => Some(value),
                })
                .cloned()
                .unwrap_or(Value::Null),
            "max" => present()
                .fold(None::<&Value>, |best, value| match best {
                    Some(b) if b.to_string() >= value.to_string() => Some(b),
                    _ => Some(value),
                })
                .cloned()
                .unwrap_or(Value::Null),
            _ => {
                UnknownAggregation {
                    function: &self.function,
                }
                .log();
                Value::Null
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupByConfig {
    pub columns: Vec<String>,
    /// `None` emits a plain `count` per group.
    pub aggregations: Option<Vec<Aggregation>>,
}

impl GroupByConfig {
    /// Reads `groupByColumns`, falling back to the older `groupColumns`.
    pub fn from_node_config(config: &NodeConfig) -> Self {
        let columns = if config.get_array("groupByColumns").is_some() {
            config.get_string_list("groupByColumns")
        } else {
            config.get_string_list("groupColumns")
        };
        let aggregations = config
            .get_array("aggregations")
            .map(|entries| entries.iter().map(Aggregation::from_json).collect());

        Self {
            columns,
            aggregations,
        }
    }

    fn group_key(&self, row: &Row) -> String {
        let mut key = String::new();
        for column in &self.columns {
            key.push_str(&row.get_or_null(column).to_string());
            key.push(KEY_SEPARATOR);
        }
        key
    }

    /// Groups come out in order of first appearance.
    pub fn apply(&self, input: &Table) -> Table {
        if self.columns.is_empty() {
            GroupByPassThrough {
                row_count: input.len(),
            }
            .log();
            return input.clone();
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Row>> = Vec::new();
        for row in input {
            let slot = *index.entry(self.group_key(row)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(row);
        }

        groups
            .iter()
            .map(|rows| {
                let mut out = Row::new();
                let first = rows[0];
                for column in &self.columns {
                    out.insert(column.clone(), first.get_or_null(column).clone());
                }
                match &self.aggregations {
                    Some(aggregations) => {
                        for aggregation in aggregations {
                            out.insert(aggregation.alias.clone(), aggregation.evaluate(rows));
                        }
                    }
                    None => out.insert("count", Value::Int(rows.len() as i64)),
                }
                out
            })
            .collect()
    }
}
