// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for transform operators.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An operator turned its input into its output.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::operator::OperatorApplied;
///
/// let msg = OperatorApplied {
///     operator: "filter",
///     node_id: "high-earners",
///     input_rows: 3,
///     output_rows: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct OperatorApplied<'a> {
    pub operator: &'a str,
    pub node_id: &'a str,
    pub input_rows: usize,
    pub output_rows: usize,
}

impl Display for OperatorApplied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} '{}': {} -> {} records",
            self.operator, self.node_id, self.input_rows, self.output_rows
        )
    }
}

impl StructuredLog for OperatorApplied<'_> {
    fn log(&self) {
        tracing::info!(
            operator = self.operator,
            node_id = self.node_id,
            input_rows = self.input_rows,
            output_rows = self.output_rows,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "operator",
            span_name = name,
            operator = self.operator,
            node_id = self.node_id,
        )
    }
}

/// Group-by without grouping columns passes its input through.
///
/// # Log Level
/// `warn!` - Configuration likely incomplete
pub struct GroupByPassThrough {
    pub row_count: usize,
}

impl Display for GroupByPassThrough {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No groupBy columns specified, passing through {} records",
            self.row_count
        )
    }
}

impl StructuredLog for GroupByPassThrough {
    fn log(&self) {
        tracing::warn!(row_count = self.row_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("group_by_pass_through", span_name = name, row_count = self.row_count)
    }
}

/// Unrecognized join type; the join falls back to inner.
///
/// # Log Level
/// `warn!` - Configuration likely mistyped
pub struct UnknownJoinType<'a> {
    pub join_type: &'a str,
}

impl Display for UnknownJoinType<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unknown join type: {}, defaulting to inner join",
            self.join_type
        )
    }
}

impl StructuredLog for UnknownJoinType<'_> {
    fn log(&self) {
        tracing::warn!(join_type = self.join_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unknown_join_type", span_name = name, join_type = self.join_type)
    }
}

/// Unrecognized aggregation function; its output column is null.
///
/// # Log Level
/// `warn!` - Configuration likely mistyped
pub struct UnknownAggregation<'a> {
    pub function: &'a str,
}

impl Display for UnknownAggregation<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Unknown aggregation function: {}", self.function)
    }
}

impl StructuredLog for UnknownAggregation<'_> {
    fn log(&self) {
        tracing::warn!(function = self.function, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unknown_aggregation", span_name = name, function = self.function)
    }
}
