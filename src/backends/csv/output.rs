// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::backends::ConnectorKind;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::observability::messages::connector::{
    ConnectorProbeFailed, NoRowsToWrite, OutputDirectoryUnavailable, RowsWritten,
};
use crate::observability::messages::StructuredLog;
use crate::table::{ColumnSchema, Table, Value};
use crate::traits::Connector;

const DEFAULT_OUTPUT_PATH: &str = "output/output.csv";
const DEFAULT_DELIMITER: &str = ",";

/// Writes rows to a delimited file, truncating whatever was there.
pub struct CsvOutput {
    file_path: String,
    delimiter: String,
    include_headers: bool,
}

impl CsvOutput {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            file_path: config
                .get_str("filePath")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            delimiter: config
                .get_str("delimiter")
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            include_headers: config.get_bool("includeHeaders").unwrap_or(true),
        }
    }

    fn parent_dir(&self) -> PathBuf {
        match Path::new(&self.file_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Header order is the order in which columns first appear across all rows.
    fn columns(table: &Table) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in table {
            for key in row.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
        columns
    }

    fn escape(&self, value: &Value) -> String {
        let text = match value {
            Value::Null => return String::new(),
            other => other.to_string(),
        };
        if text.contains(self.delimiter.as_str()) || text.contains('"') || text.contains('\n') {
            format!("\"{}\"", text.replace('"', "\"\""))
        } else {
            text
        }
    }

    pub fn render(&self, table: &Table) -> String {
        let columns = Self::columns(table);
        let mut out = String::new();

        if self.include_headers {
            out.push_str(&columns.join(self.delimiter.as_str()));
            out.push('\n');
        }

        for row in table {
            let fields: Vec<String> = columns
                .iter()
                .map(|column| self.escape(row.get_or_null(column)))
                .collect();
            out.push_str(&fields.join(self.delimiter.as_str()));
            out.push('\n');
        }

        out
    }
}

#[async_trait]
impl Connector for CsvOutput {
    async fn read(&self) -> PipelineResult<Table> {
        Err(PipelineError::UnsupportedOperation(
            "CSV output destination is write-only".to_string(),
        ))
    }

    async fn write(&self, table: &Table) -> PipelineResult<()> {
        if table.is_empty() {
            NoRowsToWrite {
                connector: self.display_name(),
                location: &self.file_path,
            }
            .log();
            return Ok(());
        }

        if self.file_path.trim().is_empty() {
            return Err(PipelineError::ConfigMessage(
                "Output file path cannot be empty".to_string(),
            ));
        }

        let parent = self.parent_dir();
        if let Err(e) = tokio::fs::create_dir_all(&parent).await {
            OutputDirectoryUnavailable {
                directory: &parent,
                error: &e,
            }
            .log();
        }

        tokio::fs::write(&self.file_path, self.render(table))
            .await
            .map_err(|e| {
                PipelineError::io(format!("Error writing CSV file: {}", self.file_path), e)
            })?;

        RowsWritten {
            connector: self.display_name(),
            location: &self.file_path,
            row_count: table.len(),
        }
        .log();

        Ok(())
    }

    async fn test_connection(&self) -> bool {
        let parent = self.parent_dir();
        let result = async {
            tokio::fs::create_dir_all(&parent).await?;
            let metadata = tokio::fs::metadata(&parent).await?;
            Ok::<bool, std::io::Error>(!metadata.permissions().readonly())
        }
        .await;

        match result {
            Ok(writable) => writable,
            Err(e) => {
                ConnectorProbeFailed {
                    connector: self.display_name(),
                    error: &e,
                }
                .log();
                false
            }
        }
    }

    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>> {
        Ok(Vec::new())
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::CsvOutput
    }
}
