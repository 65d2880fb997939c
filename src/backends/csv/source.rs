// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::parser::parse_line;
use super::paths;
use crate::backends::ConnectorKind;
use crate::config::PathsConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::observability::messages::connector::{ConnectorProbeFailed, EmptyCsvFile, RowsRead};
use crate::observability::messages::StructuredLog;
use crate::table::{ColumnSchema, Row, Table, Value};
use crate::traits::Connector;

/// Schema type reported for every CSV column.
const CSV_COLUMN_TYPE: &str = "STRING";

/// Reads a delimited file with a header line into string-valued rows.
pub struct CsvSource {
    file_path: Option<String>,
    paths: PathsConfig,
}

impl CsvSource {
    pub fn new(config: &NodeConfig, paths: &PathsConfig) -> Self {
        Self {
            file_path: config.get_str("filePath"),
            paths: paths.clone(),
        }
    }

    fn file_path(&self) -> PipelineResult<&str> {
        self.file_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::ConfigMessage("File path is required for CSV source".to_string())
            })
    }
}

async fn open_lines(path: &Path) -> PipelineResult<tokio::io::Lines<BufReader<File>>> {
    let file = File::open(path).await.map_err(|e| {
        PipelineError::io(format!("Error reading CSV file: {}", path.display()), e)
    })?;
    Ok(BufReader::new(file).lines())
}

fn read_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::io(format!("Error reading CSV file: {}", path.display()), source)
}

#[async_trait]
impl Connector for CsvSource {
    async fn read(&self) -> PipelineResult<Table> {
        let requested = self.file_path()?;
        let path = paths::resolve(requested, &self.paths).await?;
        let mut lines = open_lines(&path).await?;

        let Some(header_line) = lines.next_line().await.map_err(|e| read_error(&path, e))? else {
            EmptyCsvFile { path: &path }.log();
            return Ok(Vec::new());
        };
        let headers: Vec<String> = parse_line(&header_line)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = Table::new();
        while let Some(line) = lines.next_line().await.map_err(|e| read_error(&path, e))? {
            if line.trim().is_empty() {
                continue;
            }
            let values = parse_line(&line);
            let row: Row = headers
                .iter()
                .zip(values)
                .map(|(header, value)| (header.clone(), Value::String(value.trim().to_string())))
                .collect();
            table.push(row);
        }

        RowsRead {
            connector: self.display_name(),
            location: &path.display().to_string(),
            row_count: table.len(),
        }
        .log();

        Ok(table)
    }

    async fn write(&self, _table: &Table) -> PipelineResult<()> {
        Err(PipelineError::UnsupportedOperation(
            "CSV source is read-only".to_string(),
        ))
    }

    async fn test_connection(&self) -> bool {
        let result = async {
            let path = paths::resolve(self.file_path()?, &self.paths).await?;
            File::open(&path)
                .await
                .map_err(|e| read_error(&path, e))?;
            Ok::<(), PipelineError>(())
        }
        .await;

        match result {
            Ok(()) => true,
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
        let path = paths::resolve(self.file_path()?, &self.paths).await?;
        let mut lines = open_lines(&path).await?;

        let Some(header_line) = lines.next_line().await.map_err(|e| read_error(&path, e))? else {
            return Ok(Vec::new());
        };

        Ok(parse_line(&header_line)
            .into_iter()
            .map(|h| ColumnSchema::new(h.trim(), CSV_COLUMN_TYPE, true))
            .collect())
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::CsvFile
    }
}
