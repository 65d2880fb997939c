// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use sqlx::{Column, Connection, Executor, Statement, TypeInfo};
use std::time::Duration;

use super::{
    connect, decode_row, probe, redact, ConnectionSettings, DatabaseKind,
    DEFAULT_SQLITE_SOURCE_FILE,
};
use crate::backends::ConnectorKind;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::observability::messages::connector::{ConnectorProbeFailed, QueryExecuting, RowsRead};
use crate::observability::messages::StructuredLog;
use crate::table::{ColumnSchema, Table};
use crate::traits::Connector;

/// Reads the result of a query (or a whole table) from a relational database.
pub struct SqlSource {
    kind: ConnectorKind,
    settings: ConnectionSettings,
    query: Option<String>,
    table_name: Option<String>,
    probe_timeout: Duration,
}

impl SqlSource {
    pub fn new(kind: ConnectorKind, config: &NodeConfig, probe_timeout: Duration) -> Self {
        Self {
            kind,
            settings: ConnectionSettings::from_config(config),
            query: config.get_non_blank("query"),
            table_name: config.get_non_blank("tableName"),
            probe_timeout,
        }
    }

    fn database(&self) -> PipelineResult<DatabaseKind> {
        if let Some(database) = DatabaseKind::from_connector(self.kind) {
            return Ok(database);
        }

        // A generic source learns its database from the connection string.
        let connection_string = self.settings.connection_string.as_deref().ok_or_else(|| {
            PipelineError::ConfigMessage(
                "A connection string is required for a generic SQL source".to_string(),
            )
        })?;
        DatabaseKind::from_url(connection_string).ok_or_else(|| {
            PipelineError::UnsupportedOperation(format!(
                "Unrecognized database in connection string: {}",
                redact(connection_string)
            ))
        })
    }

    fn url(&self) -> PipelineResult<String> {
        self.settings.url(self.database()?, DEFAULT_SQLITE_SOURCE_FILE)
    }

    /// The configured query, else `SELECT * FROM <tableName>`.
    pub fn build_query(&self) -> PipelineResult<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }
        match &self.table_name {
            Some(table) => Ok(format!("SELECT * FROM {}", table)),
            None => Err(PipelineError::ConfigMessage(
                "Either 'query' or 'tableName' must be provided".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Connector for SqlSource {
    async fn read(&self) -> PipelineResult<Table> {
        let sql = self.build_query()?;
        let url = self.url()?;
        QueryExecuting { sql: &sql }.log();

        let mut conn = connect(&url).await?;
        let rows = sqlx::query(&sql)
            .fetch_all(&mut conn)
            .await
            .map_err(|e| PipelineError::connection("Error reading from database", e))?;
        let table: Table = rows.iter().map(decode_row).collect();
        conn.close()
            .await
            .map_err(|e| PipelineError::connection("Error closing connection", e))?;

        RowsRead {
            connector: self.display_name(),
            location: &redact(&url),
            row_count: table.len(),
        }
        .log();

        Ok(table)
    }

    async fn write(&self, _table: &Table) -> PipelineResult<()> {
        Err(PipelineError::UnsupportedOperation(
            "SQL source is read-only. Use SQL output for writing.".to_string(),
        ))
    }

    async fn test_connection(&self) -> bool {
        let result = match self.url() {
            Ok(url) => probe(&url, self.probe_timeout).await,
            Err(e) => Err(e),
        };

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

    /// Columns of the query, introspected from a zero-row variant of it.
    ///
    /// The `Any` driver does not expose column nullability, so every column
    /// reports `nullable: true`.
    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>> {
        let sql = format!("{} LIMIT 0", self.build_query()?);
        let url = self.url()?;

        let mut conn = connect(&url).await?;
        let statement = Executor::prepare(&mut conn, sql.as_str())
            .await
            .map_err(|e| PipelineError::connection("Error describing query", e))?;
        let schema = statement
            .columns()
            .iter()
            .map(|column| ColumnSchema::new(column.name(), column.type_info().name(), true))
            .collect();
        conn.close()
            .await
            .map_err(|e| PipelineError::connection("Error closing connection", e))?;

        Ok(schema)
    }

    fn kind(&self) -> ConnectorKind {
        self.kind
    }
}
