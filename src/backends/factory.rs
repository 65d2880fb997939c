// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt::{Display, Formatter};

use super::csv::{CsvOutput, CsvSource};
use super::placeholders::PlaceholderConnector;
use super::sql::{SqlOutput, SqlSource};
use crate::config::EngineConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::{NodeConfig, NodeKind};
use crate::traits::Connector;

/// Every kind of external data endpoint the engine knows about.
///
/// Not all of them have an implementation; see
/// [`ConnectorFactory::is_supported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectorKind {
    CsvFile,
    ExcelFile,
    JsonFile,
    SqlDatabase,
    MySql,
    PostgreSql,
    Sqlite,
    MsSql,
    Oracle,
    RestApi,
    MongoDb,
    CsvOutput,
    ExcelOutput,
    JsonOutput,
    SqlOutput,
    RestPost,
    EmailReport,
    DatabaseTable,
    FileSystem,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 19] = [
        ConnectorKind::CsvFile,
        ConnectorKind::ExcelFile,
        ConnectorKind::JsonFile,
        ConnectorKind::SqlDatabase,
        ConnectorKind::MySql,
        ConnectorKind::PostgreSql,
        ConnectorKind::Sqlite,
        ConnectorKind::MsSql,
        ConnectorKind::Oracle,
        ConnectorKind::RestApi,
        ConnectorKind::MongoDb,
        ConnectorKind::CsvOutput,
        ConnectorKind::ExcelOutput,
        ConnectorKind::JsonOutput,
        ConnectorKind::SqlOutput,
        ConnectorKind::RestPost,
        ConnectorKind::EmailReport,
        ConnectorKind::DatabaseTable,
        ConnectorKind::FileSystem,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectorKind::CsvFile => "CSV File",
            ConnectorKind::ExcelFile => "Excel File",
            ConnectorKind::JsonFile => "JSON File",
            ConnectorKind::SqlDatabase => "SQL Database",
            ConnectorKind::MySql => "MySQL Database",
            ConnectorKind::PostgreSql => "PostgreSQL Database",
            ConnectorKind::Sqlite => "SQLite Database",
            ConnectorKind::MsSql => "SQL Server Database",
            ConnectorKind::Oracle => "Oracle Database",
            ConnectorKind::RestApi => "REST API",
            ConnectorKind::MongoDb => "MongoDB",
            ConnectorKind::CsvOutput => "CSV Output",
            ConnectorKind::ExcelOutput => "Excel Output",
            ConnectorKind::JsonOutput => "JSON Output",
            ConnectorKind::SqlOutput => "SQL Database Output",
            ConnectorKind::RestPost => "REST API Post",
            ConnectorKind::EmailReport => "Email Report",
            ConnectorKind::DatabaseTable => "Database Table",
            ConnectorKind::FileSystem => "File System",
        }
    }

    pub fn can_read(&self) -> bool {
        !matches!(
            self,
            ConnectorKind::CsvOutput
                | ConnectorKind::ExcelOutput
                | ConnectorKind::JsonOutput
                | ConnectorKind::SqlOutput
                | ConnectorKind::RestPost
                | ConnectorKind::EmailReport
        )
    }

    pub fn can_write(&self) -> bool {
        matches!(
            self,
            ConnectorKind::CsvOutput
                | ConnectorKind::ExcelOutput
                | ConnectorKind::JsonOutput
                | ConnectorKind::SqlOutput
                | ConnectorKind::RestPost
                | ConnectorKind::EmailReport
                | ConnectorKind::DatabaseTable
                | ConnectorKind::FileSystem
        )
    }

    /// Connector backing a source or sink node, `None` for operators and unknown tags.
    pub fn for_node(kind: &NodeKind) -> Option<ConnectorKind> {
        match kind {
            NodeKind::CsvSource => Some(ConnectorKind::CsvFile),
            NodeKind::SqlSource => Some(ConnectorKind::SqlDatabase),
            NodeKind::MySqlSource => Some(ConnectorKind::MySql),
            NodeKind::PostgreSqlSource => Some(ConnectorKind::PostgreSql),
            NodeKind::SqliteSource => Some(ConnectorKind::Sqlite),
            NodeKind::CsvOutput => Some(ConnectorKind::CsvOutput),
            NodeKind::SqlOutput => Some(ConnectorKind::SqlOutput),
            _ => None,
        }
    }
}

impl Display for ConnectorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Builds connectors from a node's configuration bag.
pub struct ConnectorFactory;

impl ConnectorFactory {
    /// Create the connector for `kind`.
    ///
    /// Configuration is not checked here; missing fields surface when the
    /// connector is used.
    pub fn create(
        kind: ConnectorKind,
        config: &NodeConfig,
        engine_config: &EngineConfig,
    ) -> PipelineResult<Box<dyn Connector>> {
        match kind {
            ConnectorKind::CsvFile => Ok(Box::new(CsvSource::new(config, &engine_config.paths))),
            ConnectorKind::CsvOutput => Ok(Box::new(CsvOutput::new(config))),
            ConnectorKind::SqlDatabase
            | ConnectorKind::MySql
            | ConnectorKind::PostgreSql
            | ConnectorKind::Sqlite
            | ConnectorKind::MsSql
            | ConnectorKind::Oracle => Ok(Box::new(SqlSource::new(
                kind,
                config,
                engine_config.connections.test_timeout(),
            ))),
            ConnectorKind::SqlOutput => Ok(Box::new(SqlOutput::new(config, engine_config))),
            ConnectorKind::JsonFile
            | ConnectorKind::JsonOutput
            | ConnectorKind::RestApi
            | ConnectorKind::RestPost => Ok(Box::new(PlaceholderConnector::new(kind))),
            _ => Err(PipelineError::UnsupportedOperation(format!(
                "Data source type not implemented: {}",
                kind
            ))),
        }
    }

    pub fn list_supported() -> Vec<ConnectorKind> {
        ConnectorKind::ALL
            .into_iter()
            .filter(Self::is_supported)
            .collect()
    }

    pub fn is_supported(kind: &ConnectorKind) -> bool {
        matches!(
            kind,
            ConnectorKind::CsvFile
                | ConnectorKind::CsvOutput
                | ConnectorKind::SqlDatabase
                | ConnectorKind::MySql
                | ConnectorKind::PostgreSql
                | ConnectorKind::Sqlite
                | ConnectorKind::MsSql
                | ConnectorKind::Oracle
                | ConnectorKind::SqlOutput
                | ConnectorKind::JsonFile
                | ConnectorKind::JsonOutput
                | ConnectorKind::RestApi
                | ConnectorKind::RestPost
        )
    }
}
