// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline run lifecycle and per-node events.
//!
//! This module contains message types for logging events related to:
//! * Run lifecycle (start, completion, failure)
//! * Execution order resolution
//! * Node dispatch, including skipped unknown node types

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     execution_id: "0b6f6f0e-3c4e-4f7c-9a59-2f1f3a1f8e11",
///     pipeline_id: "employees",
///     node_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted<'a> {
    pub execution_id: &'a str,
    pub pipeline_id: &'a str,
    pub node_count: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pipeline execution {} for '{}' ({} nodes)",
            self.execution_id, self.pipeline_id, self.node_count
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            execution_id = self.execution_id,
            pipeline_id = self.pipeline_id,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            execution_id = self.execution_id,
            pipeline_id = self.pipeline_id,
        )
    }
}

/// Pipeline run finished successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::engine::ExecutionCompleted;
/// use std::time::Duration;
///
/// let msg = ExecutionCompleted {
///     execution_id: "0b6f6f0e-3c4e-4f7c-9a59-2f1f3a1f8e11",
///     pipeline_id: "employees",
///     records_processed: 42,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionCompleted<'a> {
    pub execution_id: &'a str,
    pub pipeline_id: &'a str,
    pub records_processed: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline execution {} completed: {} records in {:?}",
            self.execution_id, self.records_processed, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            execution_id = self.execution_id,
            pipeline_id = self.pipeline_id,
            records_processed = self.records_processed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            execution_id = self.execution_id,
            pipeline_id = self.pipeline_id,
            duration = ?self.duration,
        )
    }
}

/// Pipeline run failed with error.
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ExecutionFailed<'a> {
    pub execution_id: &'a str,
    pub pipeline_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline execution {} failed: {}",
            self.execution_id, self.error
        )
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            execution_id = self.execution_id,
            pipeline_id = self.pipeline_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "execution_failed",
            span_name = name,
            execution_id = self.execution_id,
            error = %self.error,
        )
    }
}

/// Execution order settled before the first node runs.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct ExecutionOrderResolved<'a> {
    pub order: &'a [String],
    pub explicit: bool,
}

impl Display for ExecutionOrderResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let origin = if self.explicit { "explicit" } else { "derived" };
        write!(f, "Using {} execution order: {}", origin, self.order.join(" -> "))
    }
}

impl StructuredLog for ExecutionOrderResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            explicit = self.explicit,
            node_count = self.order.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "execution_order",
            span_name = name,
            explicit = self.explicit,
            node_count = self.order.len(),
        )
    }
}

/// A node is about to run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NodeStarted<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
}

impl Display for NodeStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executing node: {} ({})", self.node_id, self.node_type)
    }
}

impl StructuredLog for NodeStarted<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            node_type = self.node_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node",
            span_name = name,
            node_id = self.node_id,
            node_type = self.node_type,
        )
    }
}

/// A node carries a type tag the engine does not know; it is skipped.
///
/// # Log Level
/// `warn!` - Node produced no output
pub struct UnknownNodeType<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
}

impl Display for UnknownNodeType<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unknown node type: {} (node '{}' skipped)",
            self.node_type, self.node_id
        )
    }
}

impl StructuredLog for UnknownNodeType<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            node_type = self.node_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unknown_node_type",
            span_name = name,
            node_id = self.node_id,
            node_type = self.node_type,
        )
    }
}

/// A node's upstream produced nothing (no incoming edge, or the upstream
/// node did not run); the node sees an empty table.
///
/// # Log Level
/// `warn!` - Likely a wiring mistake
pub struct MissingNodeInput<'a> {
    pub node_id: &'a str,
    pub upstream_id: Option<&'a str>,
}

impl Display for MissingNodeInput<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.upstream_id {
            Some(upstream) => write!(
                f,
                "Node '{}' has no cached output from upstream '{}', using empty input",
                self.node_id, upstream
            ),
            None => write!(
                f,
                "Node '{}' has no incoming edge, using empty input",
                self.node_id
            ),
        }
    }
}

impl StructuredLog for MissingNodeInput<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            upstream_id = self.upstream_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "missing_node_input",
            span_name = name,
            node_id = self.node_id,
        )
    }
}
