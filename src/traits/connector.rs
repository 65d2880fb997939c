// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::backends::ConnectorKind;
use crate::errors::PipelineResult;
use crate::table::{ColumnSchema, Table};

/// Uniform access to a data source or sink.
///
/// Each connector is built for one node and one call; implementations open
/// and close any underlying connection inside the call.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Read the whole source. Write-only connectors fail with `UnsupportedOperation`.
    async fn read(&self) -> PipelineResult<Table>;

    /// Persist `table` to the target, replacing what was there.
    /// Read-only connectors fail with `UnsupportedOperation`.
    async fn write(&self, table: &Table) -> PipelineResult<()>;

    /// Best-effort reachability probe. Never errors; failures are `false`.
    async fn test_connection(&self) -> bool;

    /// Column layout of a source. Sinks report an empty list.
    async fn schema(&self) -> PipelineResult<Vec<ColumnSchema>>;

    fn kind(&self) -> ConnectorKind;

    fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }
}
