// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use super::cache::DataCache;
use super::registry::ExecutionRegistry;
use super::report::ExecutionReport;
use crate::backends::{ConnectorFactory, ConnectorKind};
use crate::config::EngineConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::graph::{resolve_order, Node, NodeKind, Pipeline};
use crate::observability::messages::engine::{
    ExecutionCompleted, ExecutionFailed, ExecutionOrderResolved, ExecutionStarted, NodeStarted,
    UnknownNodeType,
};
use crate::observability::messages::operator::OperatorApplied;
use crate::observability::messages::StructuredLog;
use crate::operators::{FilterConfig, GroupByConfig, JoinConfig, MapConfig, SortConfig};
use crate::table::Table;
use crate::traits::{Connector, PipelineExecutor};

/// Sequential executor that runs one node at a time in resolved order.
///
/// ## Execution Strategy
///
/// 1. **Order**: the pipeline's explicit `executionOrder`, else a reversed
///    depth-first post-order from every source node
/// 2. **Dispatch**: sources read through their connector, transforms run an
///    operator over the upstream table, sinks write through their connector
/// 3. **Cache**: each source and transform output is kept per node id for the
///    nodes downstream of it; sinks and unknown node types add nothing
/// 4. **Fail fast**: the first error ends the run with a `Failed` report
///
/// Reports for every run are kept in a shared [`ExecutionRegistry`].
pub struct SequentialExecutor {
    config: Arc<EngineConfig>,
    registry: Arc<ExecutionRegistry>,
}

impl SequentialExecutor {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(Arc::new(config), Arc::new(ExecutionRegistry::new()))
    }

    /// Share one registry between several executors.
    pub fn with_registry(config: Arc<EngineConfig>, registry: Arc<ExecutionRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> Arc<ExecutionRegistry> {
        Arc::clone(&self.registry)
    }

    async fn run(&self, pipeline: &Pipeline) -> PipelineResult<DataCache> {
        let order = resolve_order(pipeline);
        ExecutionOrderResolved {
            order: &order,
            explicit: pipeline.explicit_order().is_some(),
        }
        .log();

        let mut cache = DataCache::new();
        for node_id in &order {
            let node = pipeline
                .find_node(node_id)
                .ok_or_else(|| PipelineError::Graph(format!("Node not found: {}", node_id)))?;

            let started = NodeStarted {
                node_id: &node.id,
                node_type: node.kind.as_str(),
            };
            started.log();

            let output = self
                .run_node(node, pipeline, &cache)
                .instrument(started.span("node"))
                .await?;
            if let Some(table) = output {
                cache.insert(node.id.clone(), table);
            }
        }
        Ok(cache)
    }

    /// Returns the table to cache for the node, if any.
    async fn run_node(
        &self,
        node: &Node,
        pipeline: &Pipeline,
        cache: &DataCache,
    ) -> PipelineResult<Option<Table>> {
        let id = node.id.as_str();
        let output = match &node.kind {
            kind if kind.is_source() => {
                let connector = self.connector_for(node)?;
                read_from(connector.as_ref(), id).await?
            }
            NodeKind::CsvOutput | NodeKind::SqlOutput => {
                let connector = self.connector_for(node)?;
                write_to(connector.as_ref(), cache.input_for(pipeline, id), id).await?;
                return Ok(None);
            }
            NodeKind::Filter => {
                let input = cache.input_for(pipeline, id);
                let output = FilterConfig::from_node_config(id, &node.data)?.apply(input);
                log_operator(node, input.len(), output.len());
                output
            }
            NodeKind::Map => {
                let input = cache.input_for(pipeline, id);
                let output = MapConfig::from_node_config(&node.data).apply(input);
                log_operator(node, input.len(), output.len());
                output
            }
            NodeKind::GroupBy => {
                let input = cache.input_for(pipeline, id);
                let output = GroupByConfig::from_node_config(&node.data).apply(input);
                log_operator(node, input.len(), output.len());
                output
            }
            NodeKind::Sort => {
                let input = cache.input_for(pipeline, id);
                let output = SortConfig::from_node_config(&node.data).apply(input);
                log_operator(node, input.len(), output.len());
                output
            }
            NodeKind::Join => {
                let (left, right) = cache.join_inputs(pipeline, id)?;
                let output = JoinConfig::from_node_config(id, &node.data)?.apply(left, right);
                log_operator(node, left.len() + right.len(), output.len());
                output
            }
            _ => {
                UnknownNodeType {
                    node_id: id,
                    node_type: node.kind.as_str(),
                }
                .log();
                return Ok(None);
            }
        };
        Ok(Some(output))
    }

    fn connector_for(&self, node: &Node) -> PipelineResult<Box<dyn Connector>> {
        let kind = ConnectorKind::for_node(&node.kind).ok_or_else(|| {
            PipelineError::Graph(format!(
                "Node '{}' of type {} has no connector",
                node.id, node.kind
            ))
        })?;
        ConnectorFactory::create(kind, &node.data, &self.config)
            .map_err(|e| e.in_node(&node.id, format!("Failed to create {}", kind.display_name())))
    }
}

/// Read a source, attaching the node and connector to any failure.
pub async fn read_from(connector: &dyn Connector, node_id: &str) -> PipelineResult<Table> {
    connector.read().await.map_err(|e| {
        e.in_node(
            node_id,
            format!("Failed to read from {}", connector.display_name()),
        )
    })
}

/// Write to a sink, attaching the node and connector to any failure.
pub async fn write_to(connector: &dyn Connector, table: &Table, node_id: &str) -> PipelineResult<()> {
    connector.write(table).await.map_err(|e| {
        e.in_node(
            node_id,
            format!("Failed to write to {}", connector.display_name()),
        )
    })
}

fn log_operator(node: &Node, input_rows: usize, output_rows: usize) {
    OperatorApplied {
        operator: node.kind.as_str(),
        node_id: &node.id,
        input_rows,
        output_rows,
    }
    .log();
}

#[async_trait]
impl PipelineExecutor for SequentialExecutor {
    async fn execute(&self, pipeline: &Pipeline) -> ExecutionReport {
        let mut report = ExecutionReport::running(pipeline.id.clone());
        self.registry.insert(report.clone());

        let execution_id = report.execution_id.to_string();
        let started = ExecutionStarted {
            execution_id: &execution_id,
            pipeline_id: &pipeline.id,
            node_count: pipeline.nodes.len(),
        };
        started.log();

        let clock = Instant::now();
        match self.run(pipeline).instrument(started.span("pipeline")).await {
            Ok(cache) => {
                let records = cache.max_rows();
                report.mark_completed(records as u64, pipeline.output_location());
                ExecutionCompleted {
                    execution_id: &execution_id,
                    pipeline_id: &pipeline.id,
                    records_processed: records,
                    duration: clock.elapsed(),
                }
                .log();
            }
            Err(e) => {
                ExecutionFailed {
                    execution_id: &execution_id,
                    pipeline_id: &pipeline.id,
                    error: &e,
                }
                .log();
                report.mark_failed(e);
            }
        }

        self.registry.insert(report.clone());
        report
    }

    fn execution_status(&self, execution_id: &str) -> Option<ExecutionReport> {
        self.registry.get(execution_id)
    }
}
