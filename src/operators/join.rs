// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-input joins on string equality of key values.
//!
//! Rows whose key is missing or null never match. A merged row keeps every
//! left column; a right column whose name is already taken lands under a
//! `right_` prefix instead.

use std::collections::HashSet;

use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::observability::messages::operator::UnknownJoinType;
use crate::observability::messages::StructuredLog;
use crate::table::{Row, Table, Value};

const RIGHT_PREFIX: &str = "right_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "inner" => Some(JoinType::Inner),
            "left" => Some(JoinType::Left),
            "right" => Some(JoinType::Right),
            "full" => Some(JoinType::Full),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JoinConfig {
    pub join_type: JoinType,
    pub left_key: String,
    pub right_key: String,
}

impl JoinConfig {
    /// Keys come from `leftKey`/`rightKey` or the older `leftColumn`/`rightColumn`.
    /// A missing `joinType` means inner; an unknown one is logged and treated as inner.
    pub fn from_node_config(node_id: &str, config: &NodeConfig) -> PipelineResult<Self> {
        let left_key = config
            .get_non_blank("leftKey")
            .or_else(|| config.get_non_blank("leftColumn"));
        let right_key = config
            .get_non_blank("rightKey")
            .or_else(|| config.get_non_blank("rightColumn"));

        let (Some(left_key), Some(right_key)) = (left_key.clone(), right_key.clone()) else {
            return Err(PipelineError::config(
                node_id,
                format!(
                    "Join keys must be specified. leftKey: {}, rightKey: {}",
                    left_key.as_deref().unwrap_or("null"),
                    right_key.as_deref().unwrap_or("null")
                ),
            ));
        };

        let join_type = match config.get_non_blank("joinType") {
            None => JoinType::Inner,
            Some(name) => JoinType::parse(&name).unwrap_or_else(|| {
                UnknownJoinType { join_type: &name }.log();
                JoinType::Inner
            }),
        };

        Ok(Self {
            join_type,
            left_key,
            right_key,
        })
    }

    pub fn apply(&self, left: &Table, right: &Table) -> Table {
        let (lk, rk) = (self.left_key.as_str(), self.right_key.as_str());
        match self.join_type {
            JoinType::Inner => inner_join(left, right, lk, rk),
            JoinType::Left => left_join(left, right, lk, rk),
            JoinType::Right => left_join(right, left, rk, lk),
            JoinType::Full => full_join(left, right, lk, rk),
        }
    }
}

fn key_of(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !value.is_null())
        .map(Value::to_string)
}

fn merge(left: &Row, right: &Row) -> Row {
    let mut joined = left.clone();
    for (column, value) in right.iter() {
        if joined.contains_key(column) {
            joined.insert(format!("{}{}", RIGHT_PREFIX, column), value.clone());
        } else {
            joined.insert(column.clone(), value.clone());
        }
    }
    joined
}

fn matches<'a>(right: &'a Table, right_key: &'a str, key: &'a str) -> impl Iterator<Item = &'a Row> {
    right
        .iter()
        .filter(move |row| key_of(row, right_key).as_deref() == Some(key))
}

pub fn inner_join(left: &Table, right: &Table, left_key: &str, right_key: &str) -> Table {
    let mut out = Vec::new();
    for l in left {
        let Some(key) = key_of(l, left_key) else {
            continue;
        };
        out.extend(matches(right, right_key, &key).map(|r| merge(l, r)));
    }
    out
}

/// Unmatched left rows gain the right table's columns, sampled from its
/// first row, as nulls. Columns the left row already has are left alone.
pub fn left_join(left: &Table, right: &Table, left_key: &str, right_key: &str) -> Table {
    let mut out = Vec::new();
    for l in left {
        let before = out.len();
        if let Some(key) = key_of(l, left_key) {
            out.extend(matches(right, right_key, &key).map(|r| merge(l, r)));
        }
        if out.len() == before {
            let mut joined = l.clone();
            if let Some(sample) = right.first() {
                for column in sample.keys() {
                    if !joined.contains_key(column) {
                        joined.insert(column.clone(), Value::Null);
                    }
                }
            }
            out.push(joined);
        }
    }
    out
}

/// Left join plus every right row whose non-null key matched no left row,
/// emitted as-is.
pub fn full_join(left: &Table, right: &Table, left_key: &str, right_key: &str) -> Table {
    let mut out = left_join(left, right, left_key, right_key);

    let left_keys: HashSet<String> = left.iter().filter_map(|l| key_of(l, left_key)).collect();
    out.extend(
        right
            .iter()
            .filter(|r| matches!(key_of(r, right_key), Some(key) if !left_keys.contains(&key)))
            .cloned(),
    );
    out
}
