// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for structural pipeline validation.
//!
//! This module contains message types for logging events related to:
//! * Individual validation errors and warnings
//! * Validation summaries

use crate::errors::ValidationIssue;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A single validation finding.
///
/// # Log Level
/// `error!` for errors, `warn!` for warnings
///
/// # Example
/// ```
/// use etl_pipeline::errors::ValidationIssue;
/// use etl_pipeline::observability::messages::validation::ValidationIssueFound;
///
/// let issue = ValidationIssue::DuplicateNodeId { node_id: "src".to_string() };
/// let msg = ValidationIssueFound {
///     pipeline_id: "p1",
///     issue: &issue,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ValidationIssueFound<'a> {
    pub pipeline_id: &'a str,
    pub issue: &'a ValidationIssue,
}

impl Display for ValidationIssueFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline '{}': {}", self.pipeline_id, self.issue)
    }
}

impl StructuredLog for ValidationIssueFound<'_> {
    fn log(&self) {
        if self.issue.is_warning() {
            tracing::warn!(pipeline_id = self.pipeline_id, "{}", self);
        } else {
            tracing::error!(pipeline_id = self.pipeline_id, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            pipeline_id = self.pipeline_id,
            issue = %self.issue,
        )
    }
}

/// Validation finished.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     pipeline_id: "p1",
///     error_count: 0,
///     warning_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationCompleted<'a> {
    pub pipeline_id: &'a str,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Display for ValidationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.error_count == 0 {
            write!(
                f,
                "Pipeline '{}' is valid ({} warnings)",
                self.pipeline_id, self.warning_count
            )
        } else {
            write!(
                f,
                "Pipeline '{}' is invalid: {} errors, {} warnings",
                self.pipeline_id, self.error_count, self.warning_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            pipeline_id = self.pipeline_id,
            error_count = self.error_count,
            warning_count = self.warning_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            pipeline_id = self.pipeline_id,
            error_count = self.error_count,
            warning_count = self.warning_count,
        )
    }
}
