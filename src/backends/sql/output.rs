// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use sqlx::AnyConnection;
use sqlx::Connection;
use std::path::PathBuf;
use std::time::Duration;

use super::{connect, probe, redact, ConnectionSettings, DatabaseKind};
use crate::backends::ConnectorKind;
use crate::config::EngineConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::NodeConfig;
use crate::observability::messages::connector::{
    ConnectorProbeFailed, NoRowsToWrite, OutputDirectoryUnavailable, RowsWritten, TableCreated,
};
use crate::observability::messages::StructuredLog;
use crate::table::{ColumnSchema, Table};
use crate::traits::Connector;

/// Replaces a database table with the rows it is given.
///
/// The table is dropped and recreated on every write. Column types come from
/// the runtime type of each column's value in the first row, and every value
/// is inserted as its string form, so `null` becomes the text `null`.
pub struct SqlOutput {
    table_name: Option<String>,
    database_type: Option<String>,
    settings: ConnectionSettings,
    sqlite_output_file: PathBuf,
    probe_timeout: Duration,
}

impl SqlOutput {
    pub fn new(config: &NodeConfig, engine_config: &EngineConfig) -> Self {
        Self {
            table_name: config.get_non_blank("tableName"),
            database_type: config.get_non_blank("databaseType"),
            settings: ConnectionSettings::from_config(config),
            sqlite_output_file: engine_config.sqlite.output_file.clone(),
            probe_timeout: engine_config.connections.test_timeout(),
        }
    }

    fn database(&self) -> PipelineResult<DatabaseKind> {
        let name = self.database_type.as_deref().ok_or_else(|| {
            PipelineError::ConfigMessage(
                "Database type must be specified for SQL output node".to_string(),
            )
        })?;
        DatabaseKind::parse(name).ok_or_else(|| {
            PipelineError::ConfigMessage(format!("Unsupported database type: {}", name))
        })
    }

    fn table_name(&self) -> PipelineResult<&str> {
        self.table_name.as_deref().ok_or_else(|| {
            PipelineError::ConfigMessage(
                "Table name must be specified for SQL output node".to_string(),
            )
        })
    }

    /// SQLite sinks without a connection string write to a local file that
    /// is created on demand, along with its directory.
    async fn url(&self, database: DatabaseKind) -> PipelineResult<String> {
        if database != DatabaseKind::Sqlite || self.settings.connection_string.is_some() {
            return self.settings.url(database, "");
        }

        let file = self
            .settings
            .database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.sqlite_output_file.clone());
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                OutputDirectoryUnavailable {
                    directory: parent,
                    error: &e,
                }
                .log();
            }
        }
        Ok(format!("sqlite:{}?mode=rwc", file.display()))
    }

    async fn replace_table(
        conn: &mut AnyConnection,
        database: DatabaseKind,
        table_name: &str,
        table: &Table,
    ) -> PipelineResult<()> {
        let Some(first) = table.first() else {
            return Ok(());
        };
        let columns: Vec<(&str, &'static str)> = first
            .iter()
            .map(|(name, value)| (name.as_str(), database.column_type(value)))
            .collect();

        let create = create_table_sql(database, table_name, &columns);
        let insert = insert_sql(database, table_name, &columns);

        let mut tx = conn
            .begin()
            .await
            .map_err(|e| PipelineError::connection("Error starting transaction", e))?;

        let drop = format!("DROP TABLE IF EXISTS {}", database.quote_ident(table_name));
        sqlx::query(&drop)
            .execute(&mut *tx)
            .await
            .map_err(|e| PipelineError::connection(format!("Error dropping table {}", table_name), e))?;
        sqlx::query(&create)
            .execute(&mut *tx)
            .await
            .map_err(|e| PipelineError::connection(format!("Error creating table {}", table_name), e))?;
        TableCreated {
            table: table_name,
            statement: &create,
        }
        .log();

        for row in table {
            let mut query = sqlx::query(&insert);
            for (column, _) in &columns {
                query = query.bind(row.get_or_null(column).to_string());
            }
            query.execute(&mut *tx).await.map_err(|e| {
                PipelineError::connection(format!("Error inserting into {}", table_name), e)
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| PipelineError::connection("Error committing transaction", e))
    }
}

pub fn create_table_sql(
    database: DatabaseKind,
    table_name: &str,
    columns: &[(&str, &'static str)],
) -> String {
    let definitions: Vec<String> = columns
        .iter()
        .map(|(name, column_type)| format!("{} {}", database.quote_ident(name), column_type))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        database.quote_ident(table_name),
        definitions.join(", ")
    )
}

pub fn insert_sql(
    database: DatabaseKind,
    table_name: &str,
    columns: &[(&str, &'static str)],
) -> String {
    let names: Vec<String> = columns
        .iter()
        .map(|(name, _)| database.quote_ident(name))
        .collect();
    let markers: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, (_, column_type))| database.placeholder(i + 1, column_type))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        database.quote_ident(table_name),
        names.join(", "),
        markers.join(", ")
    )
}

#[async_trait]
impl Connector for SqlOutput {
    async fn read(&self) -> PipelineResult<Table> {
        Err(PipelineError::UnsupportedOperation(
            "SQL output is write-only".to_string(),
        ))
    }

    async fn write(&self, table: &Table) -> PipelineResult<()> {
        let database = self.database()?;
        let table_name = self.table_name()?;
        database.ensure_driver()?;

        if table.is_empty() {
            NoRowsToWrite {
                connector: self.display_name(),
                location: table_name,
            }
            .log();
            return Ok(());
        }

        let url = self.url(database).await?;
        let mut conn = connect(&url).await?;

        if database == DatabaseKind::Sqlite {
            for pragma in ["PRAGMA foreign_keys = ON", "PRAGMA journal_mode = WAL"] {
                sqlx::query(pragma)
                    .execute(&mut conn)
                    .await
                    .map_err(|e| PipelineError::connection("Error configuring SQLite", e))?;
            }
        }

        Self::replace_table(&mut conn, database, table_name, table).await?;
        conn.close()
            .await
            .map_err(|e| PipelineError::connection("Error closing connection", e))?;

        RowsWritten {
            connector: self.display_name(),
            location: &format!("{} ({})", table_name, redact(&url)),
            row_count: table.len(),
        }
        .log();

        Ok(())
    }

    async fn test_connection(&self) -> bool {
        let result = async {
            let database = self.database()?;
            let url = self.url(database).await?;
            probe(&url, self.probe_timeout).await
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
        Ok(Vec::new())
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::SqlOutput
    }
}
