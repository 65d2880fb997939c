// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while executing a pipeline.
//!
//! Every failure a node can produce maps onto one of the [`ErrorKind`]
//! classes. The executor never lets these escape `execute`; they are folded
//! into the terminal `Failed` report instead.

use thiserror::Error;

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid node configuration
    Config,
    /// Dangling edge, missing node, wrong join fan-in
    Graph,
    /// Local file access failure
    Io,
    /// Database access failure
    Connection,
    /// Connector called in the wrong direction, or not implemented
    Unsupported,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A node's configuration bag is missing a field or holds an unusable value.
    #[error("Invalid configuration for node '{node_id}': {message}")]
    Config { node_id: String, message: String },

    /// Configuration problem detected by a connector, which has no node id of its own.
    #[error("{0}")]
    ConfigMessage(String),

    /// The graph cannot be executed as described.
    #[error("{0}")]
    Graph(String),

    /// Local file system failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be located in any of the probed areas.
    #[error("File not found: {path} (looked in: {})", candidates.join(", "))]
    NotFound {
        path: String,
        candidates: Vec<String>,
    },

    /// Database driver failure.
    #[error("{context}: {source}")]
    Connection {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// Database failure without an underlying driver error (timeouts, bad URLs).
    #[error("{0}")]
    ConnectionMessage(String),

    /// The connector cannot perform the requested operation.
    #[error("{0}")]
    UnsupportedOperation(String),

    /// Wraps the failure of a single node with the action it was performing.
    #[error("{action}: {source}")]
    NodeFailed {
        node_id: String,
        action: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    pub fn config(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Config {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn connection(context: impl Into<String>, source: sqlx::Error) -> Self {
        PipelineError::Connection {
            context: context.into(),
            source,
        }
    }

    /// Attach node context to an error raised by a connector or operator.
    pub fn in_node(self, node_id: &str, action: impl Into<String>) -> Self {
        PipelineError::NodeFailed {
            node_id: node_id.to_string(),
            action: action.into(),
            source: Box::new(self),
        }
    }

    /// Classify the error, looking through node context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Config { .. } | PipelineError::ConfigMessage(_) => ErrorKind::Config,
            PipelineError::Graph(_) => ErrorKind::Graph,
            PipelineError::Io { .. } | PipelineError::NotFound { .. } => ErrorKind::Io,
            PipelineError::Connection { .. } | PipelineError::ConnectionMessage(_) => {
                ErrorKind::Connection
            }
            PipelineError::UnsupportedOperation(_) => ErrorKind::Unsupported,
            PipelineError::NodeFailed { source, .. } => source.kind(),
        }
    }

    /// Render the full cause chain, used as the report's diagnostic trace.
    pub fn diagnostic_trace(self) -> String {
        format!("{:?}", anyhow::Error::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_node_context() {
        let err = PipelineError::UnsupportedOperation("CSV source is read-only".into())
            .in_node("src", "Failed to write to CSV File");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(
            err.to_string(),
            "Failed to write to CSV File: CSV source is read-only"
        );
    }

    #[test]
    fn test_not_found_lists_candidates() {
        let err = PipelineError::NotFound {
            path: "people.csv".into(),
            candidates: vec!["uploads/people.csv".into(), "../sample-data/people.csv".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("people.csv"));
        assert!(msg.contains("uploads/people.csv, ../sample-data/people.csv"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_diagnostic_trace_includes_causes() {
        let err = PipelineError::io(
            "Error reading CSV file: data.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .in_node("a", "Failed to read from CSV File");

        let trace = err.diagnostic_trace();
        assert!(trace.contains("Failed to read from CSV File"));
        assert!(trace.contains("Caused by"));
        assert!(trace.contains("denied"));
    }
}
