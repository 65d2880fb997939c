// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::ExecutionReport;
use crate::graph::Pipeline;

#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    /// Run every node of `pipeline` and return the terminal report.
    ///
    /// Never fails: problems are captured in a `Failed` report carrying the
    /// error message and its cause chain.
    async fn execute(&self, pipeline: &Pipeline) -> ExecutionReport;

    /// Look up a report produced by an earlier `execute` call.
    fn execution_status(&self, execution_id: &str) -> Option<ExecutionReport>;
}
