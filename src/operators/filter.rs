// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::table::{Row, Table};

/// Comparison applied by a filter node.
///
/// String operators compare the cell's string form. Ordering operators parse
/// both sides as floating point and reject the row when either side fails.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    /// Matches nothing.
    Unknown(String),
}

impl FilterOperator {
    pub fn parse(op: &str) -> Self {
        match op {
            "==" => FilterOperator::Equals,
            "!=" => FilterOperator::NotEquals,
            "contains" => FilterOperator::Contains,
            "startswith" => FilterOperator::StartsWith,
            "endswith" => FilterOperator::EndsWith,
            ">" => FilterOperator::GreaterThan,
            "<" => FilterOperator::LessThan,
            ">=" => FilterOperator::GreaterOrEqual,
            "<=" => FilterOperator::LessOrEqual,
            other => FilterOperator::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterConfig {
    pub fn from_node_config(node_id: &str, config: &NodeConfig) -> PipelineResult<Self> {
        let column = config.require_str(node_id, "column")?;
        let operator = FilterOperator::parse(&config.require_str(node_id, "operator")?);
        let value = config.get_str("value").ok_or_else(|| {
            PipelineError::config(node_id, "missing required field 'value'")
        })?;

        Ok(Self {
            column,
            operator,
            value,
        })
    }

    /// A missing or null cell never matches.
    pub fn matches(&self, row: &Row) -> bool {
        let cell = match row.get(&self.column) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => return false,
        };

        match &self.operator {
            FilterOperator::Equals => cell == self.value,
            FilterOperator::NotEquals => cell != self.value,
            FilterOperator::Contains => cell.contains(self.value.as_str()),
            FilterOperator::StartsWith => cell.starts_with(self.value.as_str()),
            FilterOperator::EndsWith => cell.ends_with(self.value.as_str()),
            FilterOperator::Unknown(_) => false,
            ordering => {
                let (Ok(lhs), Ok(rhs)) = (cell.trim().parse::<f64>(), self.value.trim().parse::<f64>())
                else {
                    return false;
                };
                match ordering {
                    FilterOperator::GreaterThan => lhs > rhs,
                    FilterOperator::LessThan => lhs < rhs,
                    FilterOperator::GreaterOrEqual => lhs >= rhs,
                    FilterOperator::LessOrEqual => lhs <= rhs,
                    _ => false,
                }
            }
        }
    }

    pub fn apply(&self, input: &Table) -> Table {
        input.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use serde_json::json;

    fn people() -> Table {
        vec![
            [("name", Value::from("Alice")), ("salary", Value::from("85000"))]
                .into_iter()
                .collect(),
            [("name", Value::from("Bob")), ("salary", Value::Int(62000))]
                .into_iter()
                .collect(),
            [("name", Value::from("Carol")), ("salary", Value::from("n/a"))]
                .into_iter()
                .collect(),
            [("name", Value::from("Dan"))].into_iter().collect(),
            [("name", Value::Null), ("salary", Value::Float(99000.0))]
                .into_iter()
                .collect(),
        ]
    }

    fn filter(column: &str, operator: &str, value: &str) -> FilterConfig {
        FilterConfig::from_node_config(
            "f",
            &NodeConfig::from_json(json!({"column": column, "operator": operator, "value": value})),
        )
        .unwrap()
    }

    fn names(table: &Table) -> Vec<String> {
        table.iter().map(|r| r.get_or_null("name").to_string()).collect()
    }

    #[test]
    fn test_numeric_comparison_skips_unparsable_and_missing() {
        let out = filter("salary", ">", "70000").apply(&people());
        assert_eq!(names(&out), vec!["Alice", "null"]);
    }

    #[test]
    fn test_string_operators() {
        assert_eq!(names(&filter("name", "==", "Bob").apply(&people())), vec!["Bob"]);
        assert_eq!(
            names(&filter("name", "!=", "Bob").apply(&people())),
            vec!["Alice", "Carol", "Dan"]
        );
        assert_eq!(names(&filter("name", "contains", "a").apply(&people())), vec!["Carol", "Dan"]);
        assert_eq!(names(&filter("name", "startswith", "C").apply(&people())), vec!["Carol"]);
        assert_eq!(names(&filter("name", "endswith", "e").apply(&people())), vec!["Alice"]);
    }

    #[test]
    fn test_equality_uses_string_form() {
        // 99000.0 renders with its decimal point
        let out = filter("salary", "==", "99000.0").apply(&people());
        assert_eq!(out.len(), 1);
        assert!(filter("salary", "==", "99000").apply(&people()).is_empty());
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let input = people();
        for op in ["==", "!=", ">", "<", ">=", "<=", "contains", "bogus"] {
            let out = filter("salary", op, "62000").apply(&input);
            assert!(out.iter().all(|row| input.contains(row)));
            assert!(out.iter().all(|row| row.get("salary").is_some()));
        }
        assert!(filter("salary", "bogus", "1").apply(&input).is_empty());
    }

    #[test]
    fn test_numeric_value_in_config_is_accepted() {
        let config = FilterConfig::from_node_config(
            "f",
            &NodeConfig::from_json(json!({"column": "salary", "operator": "<=", "value": 62000})),
        )
        .unwrap();
        assert_eq!(names(&config.apply(&people())), vec!["Bob"]);
    }

    #[test]
    fn test_missing_column_is_config_error() {
        let err = FilterConfig::from_node_config(
            "f",
            &NodeConfig::from_json(json!({"operator": "==", "value": "x"})),
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Config);
        assert!(err.to_string().contains("column"));
    }
}
