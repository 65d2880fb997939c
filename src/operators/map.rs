// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value as JsonValue;

use crate::graph::NodeConfig;
use crate::table::{Row, Table, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum MapOperation {
    Uppercase,
    Lowercase,
    Multiply,
    Add,
    /// Copies the value unchanged.
    Identity,
}

impl MapOperation {
    pub fn parse(op: Option<&str>) -> Self {
        match op {
            Some("uppercase") => MapOperation::Uppercase,
            Some("lowercase") => MapOperation::Lowercase,
            Some("multiply") => MapOperation::Multiply,
            Some("add") => MapOperation::Add,
            _ => MapOperation::Identity,
        }
    }
}

/// One column rewrite: read `source_column`, transform, write `target_column`.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub source_column: String,
    pub target_column: String,
    pub operation: MapOperation,
    pub operand: Option<String>,
}

impl Mapping {
    fn from_json(entry: &JsonValue) -> Option<Self> {
        let field = |key: &str| match entry.get(key)? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        };

        Some(Self {
            source_column: field("sourceColumn")?,
            target_column: field("targetColumn")?,
            operation: MapOperation::parse(entry.get("operation").and_then(JsonValue::as_str)),
            operand: field("value"),
        })
    }

    /// Numeric operations on unparsable input leave the value as it was.
    pub fn transform(&self, value: &Value) -> Value {
        if value.is_null() {
            return Value::Null;
        }
        match self.operation {
            MapOperation::Uppercase => Value::String(value.to_string().to_uppercase()),
            MapOperation::Lowercase => Value::String(value.to_string().to_lowercase()),
            MapOperation::Multiply => self.arithmetic(value, |a, b| a * b),
            MapOperation::Add => self.arithmetic(value, |a, b| a + b),
            MapOperation::Identity => value.clone(),
        }
    }

    fn arithmetic(&self, value: &Value, op: impl Fn(f64, f64) -> f64) -> Value {
        let lhs = value.to_string().trim().parse::<f64>();
        let rhs = self.operand.as_deref().map(|s| s.trim().parse::<f64>());
        match (lhs, rhs) {
            (Ok(a), Some(Ok(b))) => Value::Float(op(a, b)),
            _ => value.clone(),
        }
    }
}

/// Ordered list of column rewrites applied to every row.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    pub mappings: Vec<Mapping>,
}

impl MapConfig {
    /// Entries lacking a source or target column are ignored.
    pub fn from_node_config(config: &NodeConfig) -> Self {
        let mappings = config
            .get_array("mappings")
            .map(|entries| entries.iter().filter_map(Mapping::from_json).collect())
            .unwrap_or_default();
        Self { mappings }
    }

    /// Every mapping reads from the original row and writes into one shared
    /// copy, so later mappings never see the output of earlier ones.
    pub fn apply_row(&self, row: &Row) -> Row {
        let mut out = row.clone();
        for mapping in &self.mappings {
            let Some(value) = row.get(&mapping.source_column) else {
                continue;
            };
            out.insert(mapping.target_column.clone(), mapping.transform(value));
            if mapping.source_column != mapping.target_column {
                out.remove(&mapping.source_column);
            }
        }
        out
    }

    pub fn apply(&self, input: &Table) -> Table {
        input.iter().map(|row| self.apply_row(row)).collect()
    }
}
