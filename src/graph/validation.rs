// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for pipeline graphs.
//!
//! Runs before execution and collects every problem instead of stopping at
//! the first one. Checks, in order:
//!
//! 1. **Nodes**: at least one node, non-blank unique ids, non-blank types,
//!    at least one source, and the required fields of each node type
//! 2. **Edges**: both endpoints present and referencing existing nodes
//! 3. **Ordering**: a warning when no explicit execution order is given
//!
//! The executor does not repeat these checks. A graph that skips validation
//! surfaces the same problems as runtime failures instead.

use super::{NodeKind, NodeConfig, Pipeline};
use crate::errors::ValidationIssue;
use crate::observability::messages::validation::{ValidationCompleted, ValidationIssueFound};
use crate::observability::messages::StructuredLog;
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of [`validate_pipeline`]. `valid` is true when `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: &[ValidationIssue]) -> Self {
        let (warnings, errors): (Vec<&ValidationIssue>, Vec<&ValidationIssue>) =
            issues.iter().partition(|i| i.is_warning());
        Self {
            valid: errors.is_empty(),
            errors: errors.iter().map(|i| i.to_string()).collect(),
            warnings: warnings.iter().map(|i| i.to_string()).collect(),
        }
    }
}

pub fn validate_pipeline(pipeline: &Pipeline) -> ValidationReport {
    let issues = collect_issues(pipeline);

    for issue in &issues {
        ValidationIssueFound {
            pipeline_id: &pipeline.id,
            issue,
        }
        .log();
    }

    let report = ValidationReport::from_issues(&issues);
    ValidationCompleted {
        pipeline_id: &pipeline.id,
        error_count: report.errors.len(),
        warning_count: report.warnings.len(),
    }
    .log();

    report
}

/// Every issue found in the graph, errors and warnings interleaved in check order.
pub fn collect_issues(pipeline: &Pipeline) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if pipeline.nodes.is_empty() {
        issues.push(ValidationIssue::EmptyPipeline);
    } else {
        validate_nodes(pipeline, &mut issues);
    }

    validate_edges(pipeline, &mut issues);

    if pipeline.explicit_order().is_none() {
        issues.push(ValidationIssue::NoExecutionOrder);
    }

    issues
}

fn validate_nodes(pipeline: &Pipeline, issues: &mut Vec<ValidationIssue>) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut has_source = false;

    for node in &pipeline.nodes {
        if node.id.trim().is_empty() {
            issues.push(ValidationIssue::BlankNodeId);
        } else if !seen.insert(node.id.as_str()) {
            issues.push(ValidationIssue::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }

        let tag = node.kind.as_str();
        if tag.trim().is_empty() {
            issues.push(ValidationIssue::BlankNodeType {
                node_id: node.id.clone(),
            });
            continue;
        }

        match &node.kind {
            NodeKind::CsvSource => {
                has_source = true;
                require(&node.data, "filePath", "CSV source", "a file path", issues);
            }
            // Any "*Source" tag is treated as relational, including ones the engine cannot run.
            kind if kind.is_source() || tag.ends_with("Source") => {
                has_source = true;
                validate_sql_source(&node.data, issues);
            }
            NodeKind::SqlOutput => validate_sql_output(&node.data, issues),
            NodeKind::CsvOutput => {
                require(&node.data, "filePath", "CSV output", "a file path", issues);
            }
            NodeKind::Filter => {
                require(&node.data, "column", "Filter", "a column", issues);
                require(&node.data, "operator", "Filter", "an operator", issues);
                require(&node.data, "value", "Filter", "a value", issues);
            }
            _ => {}
        }
    }

    if !has_source {
        issues.push(ValidationIssue::MissingSource);
    }
}

fn require(
    data: &NodeConfig,
    key: &str,
    node_label: &'static str,
    field: &'static str,
    issues: &mut Vec<ValidationIssue>,
) {
    if data.get_non_blank(key).is_none() {
        issues.push(ValidationIssue::MissingField { node_label, field });
    }
}

fn has_connection(data: &NodeConfig) -> bool {
    data.get_non_blank("connectionString").is_some()
        || (data.get_non_blank("host").is_some() && data.get_non_blank("database").is_some())
}

fn validate_sql_source(data: &NodeConfig, issues: &mut Vec<ValidationIssue>) {
    if !has_connection(data) {
        issues.push(ValidationIssue::MissingConnection {
            node_label: "SQL source",
        });
    }
    if data.get_non_blank("query").is_none() && data.get_non_blank("tableName").is_none() {
        issues.push(ValidationIssue::MissingQueryOrTable);
    }
}

fn validate_sql_output(data: &NodeConfig, issues: &mut Vec<ValidationIssue>) {
    require(data, "tableName", "SQL output", "a table name", issues);

    let Some(database_type) = data.get_non_blank("databaseType") else {
        issues.push(ValidationIssue::MissingField {
            node_label: "SQL output",
            field: "a database type",
        });
        return;
    };

    if database_type.eq_ignore_ascii_case("sqlite") {
        return;
    }

    if !has_connection(data) {
        issues.push(ValidationIssue::MissingConnection {
            node_label: "SQL output",
        });
    }
    if data.get_non_blank("username").is_none() {
        issues.push(ValidationIssue::MissingUsername);
    }
}

fn validate_edges(pipeline: &Pipeline, issues: &mut Vec<ValidationIssue>) {
    let node_ids: HashSet<&str> = pipeline.nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in &pipeline.edges {
        if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
            issues.push(ValidationIssue::IncompleteEdge {
                edge_id: edge.id.clone(),
            });
        }
        if !node_ids.contains(edge.source.as_str()) {
            issues.push(ValidationIssue::DanglingEdgeSource {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            });
        }
        if !node_ids.contains(edge.target.as_str()) {
            issues.push(ValidationIssue::DanglingEdgeTarget {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            });
        }
    }
}
