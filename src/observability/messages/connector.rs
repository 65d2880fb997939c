// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for source and sink activity.
//!
//! This module contains message types for logging events related to:
//! * Rows read from and written to connectors
//! * File lookup across the uploads and sample-data areas
//! * Sinks receiving no rows
//! * Connection probes that fail

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// Rows loaded from a source.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::connector::RowsRead;
///
/// let msg = RowsRead {
///     connector: "CSV File",
///     location: "uploads/employees.csv",
///     row_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RowsRead<'a> {
    pub connector: &'a str,
    pub location: &'a str,
    pub row_count: usize,
}

impl Display for RowsRead<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} records from {}: {}",
            self.row_count, self.connector, self.location
        )
    }
}

impl StructuredLog for RowsRead<'_> {
    fn log(&self) {
        tracing::info!(
            connector = self.connector,
            location = self.location,
            row_count = self.row_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "connector_read",
            span_name = name,
            connector = self.connector,
            location = self.location,
        )
    }
}

/// Rows persisted to a sink.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RowsWritten<'a> {
    pub connector: &'a str,
    pub location: &'a str,
    pub row_count: usize,
}

impl Display for RowsWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} records to {}: {}",
            self.row_count, self.connector, self.location
        )
    }
}

impl StructuredLog for RowsWritten<'_> {
    fn log(&self) {
        tracing::info!(
            connector = self.connector,
            location = self.location,
            row_count = self.row_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "connector_write",
            span_name = name,
            connector = self.connector,
            location = self.location,
        )
    }
}

/// A sink was handed an empty table and left its target untouched.
///
/// # Log Level
/// `warn!` - Nothing was written
pub struct NoRowsToWrite<'a> {
    pub connector: &'a str,
    pub location: &'a str,
}

impl Display for NoRowsToWrite<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No data to write to {}: {}",
            self.connector, self.location
        )
    }
}

impl StructuredLog for NoRowsToWrite<'_> {
    fn log(&self) {
        tracing::warn!(
            connector = self.connector,
            location = self.location,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "no_rows_to_write",
            span_name = name,
            connector = self.connector,
            location = self.location,
        )
    }
}

/// A CSV file had no header line.
///
/// # Log Level
/// `warn!` - Source produced no rows
pub struct EmptyCsvFile<'a> {
    pub path: &'a Path,
}

impl Display for EmptyCsvFile<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "CSV file is empty: {}", self.path.display())
    }
}

impl StructuredLog for EmptyCsvFile<'_> {
    fn log(&self) {
        tracing::warn!(path = %self.path.display(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("empty_csv_file", span_name = name, path = %self.path.display())
    }
}

/// A relative CSV path was found in one of the probed areas.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use etl_pipeline::observability::messages::connector::FileResolved;
/// use std::path::Path;
///
/// let msg = FileResolved {
///     requested: "employees.csv",
///     resolved: Path::new("uploads/employees.csv"),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct FileResolved<'a> {
    pub requested: &'a str,
    pub resolved: &'a Path,
}

impl Display for FileResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved {} to {}",
            self.requested,
            self.resolved.display()
        )
    }
}

impl StructuredLog for FileResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            requested = self.requested,
            resolved = %self.resolved.display(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "file_resolved",
            span_name = name,
            requested = self.requested,
            resolved = %self.resolved.display(),
        )
    }
}

/// Output directory could not be created ahead of a write.
///
/// # Log Level
/// `warn!` - The write that follows will likely fail
pub struct OutputDirectoryUnavailable<'a> {
    pub directory: &'a Path,
    pub error: &'a dyn Display,
}

impl Display for OutputDirectoryUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not create output directory {}: {}",
            self.directory.display(),
            self.error
        )
    }
}

impl StructuredLog for OutputDirectoryUnavailable<'_> {
    fn log(&self) {
        tracing::warn!(
            directory = %self.directory.display(),
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "output_directory_unavailable",
            span_name = name,
            directory = %self.directory.display(),
        )
    }
}

/// A connection probe failed; the probe itself reports `false`.
///
/// # Log Level
/// `warn!` - Target unreachable
pub struct ConnectorProbeFailed<'a> {
    pub connector: &'a str,
    pub error: &'a dyn Display,
}

impl Display for ConnectorProbeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} connection test failed: {}", self.connector, self.error)
    }
}

impl StructuredLog for ConnectorProbeFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            connector = self.connector,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "connector_probe_failed",
            span_name = name,
            connector = self.connector,
            error = %self.error,
        )
    }
}

/// SQL about to be sent to a database.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct QueryExecuting<'a> {
    pub sql: &'a str,
}

impl Display for QueryExecuting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executing query: {}", self.sql)
    }
}

impl StructuredLog for QueryExecuting<'_> {
    fn log(&self) {
        tracing::debug!(sql = self.sql, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("query", span_name = name, sql = self.sql)
    }
}

/// A sink table was dropped and recreated.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct TableCreated<'a> {
    pub table: &'a str,
    pub statement: &'a str,
}

impl Display for TableCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Created table {}: {}", self.table, self.statement)
    }
}

impl StructuredLog for TableCreated<'_> {
    fn log(&self) {
        tracing::debug!(
            table = self.table,
            statement = self.statement,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("table_created", span_name = name, table = self.table)
    }
}
