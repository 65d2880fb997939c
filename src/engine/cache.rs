// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::{PipelineError, PipelineResult};
use crate::graph::Pipeline;
use crate::observability::messages::engine::MissingNodeInput;
use crate::observability::messages::StructuredLog;
use crate::table::Table;

/// Output tables of the nodes that have run so far, keyed by node id.
///
/// Owned by a single run and dropped with it.
#[derive(Debug, Default)]
pub struct DataCache {
    tables: HashMap<String, Table>,
    empty: Table,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_id: impl Into<String>, table: Table) {
        self.tables.insert(node_id.into(), table);
    }

    pub fn get(&self, node_id: &str) -> Option<&Table> {
        self.tables.get(node_id)
    }

    /// The output of the node feeding `node_id` through its first incoming
    /// edge. No edge, or an upstream without output, yields an empty table.
    pub fn input_for(&self, pipeline: &Pipeline, node_id: &str) -> &Table {
        let upstream = pipeline.incoming_edges(node_id).next().map(|e| e.source.as_str());
        match upstream.and_then(|id| self.tables.get(id)) {
            Some(table) => table,
            None => {
                MissingNodeInput {
                    node_id,
                    upstream_id: upstream,
                }
                .log();
                &self.empty
            }
        }
    }

    /// The two upstream tables of a join, in edge order.
    pub fn join_inputs(&self, pipeline: &Pipeline, node_id: &str) -> PipelineResult<(&Table, &Table)> {
        let upstream: Vec<&str> = pipeline
            .incoming_edges(node_id)
            .map(|e| e.source.as_str())
            .collect();
        if upstream.len() != 2 {
            return Err(PipelineError::Graph(format!(
                "Join node '{}' must have exactly 2 input connections, but has: {}",
                node_id,
                upstream.len()
            )));
        }

        match (self.tables.get(upstream[0]), self.tables.get(upstream[1])) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(PipelineError::Graph(format!(
                "Input data not found for join node '{}'",
                node_id
            ))),
        }
    }

    /// Largest row count among cached tables.
    pub fn max_rows(&self) -> usize {
        self.tables.values().map(Vec::len).max().unwrap_or(0)
    }
}
