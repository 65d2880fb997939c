// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use crate::backends::ConnectorKind;
use crate::errors::{PipelineError, PipelineResult};
use crate::table::{ColumnSchema, Table};
use crate::traits::Connector;

/// A connector backed by an in-memory table, recording what it is asked to write
pub struct MemoryConnector {
    pub rows: Table,
    pub written: Arc<Mutex<Table>>,
}

impl MemoryConnector {
    pub fn new(rows: Table) -> Self {
        Self {
            rows,
            written: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait::async_trait]
impl Connector for MemoryConnector {
    async fn read(&self) -> PipelineResult<Table> {
        Ok(self.rows.clone())
    }

    async fn write(&self, table: &Table) -> PipelineResult<()> {
        let mut written = self.written.lock().unwrap();
        *written = table.clone();
        Ok(())
    }

    async fn test_connection(&self) -> bool {
        true
    }

    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>> {
        let columns = self
            .rows
            .first()
            .map(|row| {
                row.keys()
                    .map(|name| ColumnSchema::new(name, "STRING", true))
                    .collect()
            })
            .unwrap_or_default();
        Ok(columns)
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::CsvFile
    }
}

/// A connector that fails every operation for testing failure scenarios
pub struct FailingConnector;

#[async_trait::async_trait]
impl Connector for FailingConnector {
    async fn read(&self) -> PipelineResult<Table> {
        Err(PipelineError::ConnectionMessage(
            "Simulated connector failure".to_string(),
        ))
    }

    async fn write(&self, _table: &Table) -> PipelineResult<()> {
        Err(PipelineError::ConnectionMessage(
            "Simulated connector failure".to_string(),
        ))
    }

    async fn test_connection(&self) -> bool {
        false
    }

    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>> {
        Ok(Vec::new())
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::SqlDatabase
    }
}
