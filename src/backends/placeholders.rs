// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::ConnectorKind;
use crate::errors::{PipelineError, PipelineResult};
use crate::table::{ColumnSchema, Table};
use crate::traits::Connector;

/// Stand-in for JSON file and REST endpoints that have no implementation yet.
pub struct PlaceholderConnector {
    kind: ConnectorKind,
}

impl PlaceholderConnector {
    pub fn new(kind: ConnectorKind) -> Self {
        Self { kind }
    }

    fn label(&self) -> &'static str {
        match self.kind {
            ConnectorKind::JsonFile => "JSON input",
            ConnectorKind::JsonOutput => "JSON output",
            ConnectorKind::RestApi => "REST API input",
            ConnectorKind::RestPost => "REST API output",
            _ => self.kind.display_name(),
        }
    }
}

#[async_trait]
impl Connector for PlaceholderConnector {
    async fn read(&self) -> PipelineResult<Table> {
        let reason = if self.kind.can_read() {
            format!("{} not yet implemented", self.label())
        } else {
            format!("{} is write-only", self.label())
        };
        Err(PipelineError::UnsupportedOperation(reason))
    }

    async fn write(&self, _table: &Table) -> PipelineResult<()> {
        let reason = if self.kind.can_write() {
            format!("{} not yet implemented", self.label())
        } else {
            format!("{} is read-only", self.label())
        };
        Err(PipelineError::UnsupportedOperation(reason))
    }

    async fn test_connection(&self) -> bool {
        false
    }

    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>> {
        Ok(Vec::new())
    }

    fn kind(&self) -> ConnectorKind {
        self.kind
    }
}
