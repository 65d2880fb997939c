// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Problems found while validating a pipeline graph before execution
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// The graph has no nodes at all
    EmptyPipeline,
    /// No node of a recognized source kind exists
    MissingSource,
    /// A node has a blank identifier
    BlankNodeId,
    /// A node has a blank type tag
    BlankNodeType {
        node_id: String,
    },
    /// Two nodes share the same identifier
    DuplicateNodeId {
        node_id: String,
    },
    /// An edge endpoint is blank
    IncompleteEdge {
        edge_id: String,
    },
    /// An edge source references a node that is not in the graph
    DanglingEdgeSource {
        edge_id: String,
        node_id: String,
    },
    /// An edge target references a node that is not in the graph
    DanglingEdgeTarget {
        edge_id: String,
        node_id: String,
    },
    /// A type-specific required field is missing or blank
    MissingField {
        node_label: &'static str,
        field: &'static str,
    },
    /// A relational node has neither a connection string nor host + database
    MissingConnection {
        node_label: &'static str,
    },
    /// A relational source has neither a table name nor a query
    MissingQueryOrTable,
    /// Warning: no explicit execution order was supplied
    NoExecutionOrder,
    /// Warning: a relational sink has no username
    MissingUsername,
}

impl ValidationIssue {
    /// Warnings never make a pipeline invalid.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ValidationIssue::NoExecutionOrder | ValidationIssue::MissingUsername
        )
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyPipeline => write!(f, "Pipeline must contain at least one node"),
            ValidationIssue::MissingSource => {
                write!(f, "Pipeline must contain at least one source node")
            }
            ValidationIssue::BlankNodeId => write!(f, "Node must have a valid ID"),
            ValidationIssue::BlankNodeType { node_id } => {
                write!(f, "Node '{}' must have a valid type", node_id)
            }
            ValidationIssue::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
            ValidationIssue::IncompleteEdge { edge_id } => {
                write!(
                    f,
                    "Edge '{}' must have both source and target nodes",
                    edge_id
                )
            }
            ValidationIssue::DanglingEdgeSource { edge_id, node_id } => {
                write!(
                    f,
                    "Edge '{}' references non-existent source node: {}",
                    edge_id, node_id
                )
            }
            ValidationIssue::DanglingEdgeTarget { edge_id, node_id } => {
                write!(
                    f,
                    "Edge '{}' references non-existent target node: {}",
                    edge_id, node_id
                )
            }
            ValidationIssue::MissingField { node_label, field } => {
                write!(f, "{} node must specify {}", node_label, field)
            }
            ValidationIssue::MissingConnection { node_label } => {
                write!(
                    f,
                    "{} node must specify either a connection string or host/database details",
                    node_label
                )
            }
            ValidationIssue::MissingQueryOrTable => {
                write!(
                    f,
                    "SQL source node must specify either a table name or SQL query"
                )
            }
            ValidationIssue::NoExecutionOrder => {
                write!(f, "No execution order specified - will use default ordering")
            }
            ValidationIssue::MissingUsername => {
                write!(
                    f,
                    "SQL output node should specify a username for database authentication"
                )
            }
        }
    }
}

impl std::error::Error for ValidationIssue {}
