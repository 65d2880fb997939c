// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PipelineError;

/// Message recorded on a successful run.
pub const SUCCESS_MESSAGE: &str = "Pipeline executed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Success | ExecutionStatus::Failed | ExecutionStatus::Cancelled
        )
    }
}

/// Record of one pipeline run.
///
/// Created `Running`, moved to a terminal status once, then left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub execution_id: Uuid,
    pub pipeline_id: String,
    pub status: ExecutionStatus,
    pub message: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub records_processed: u64,
    pub output_location: Option<String>,
    pub error_message: Option<String>,
    /// Full cause chain of the failure.
    pub error_detail: Option<String>,
}

impl ExecutionReport {
    pub fn running(pipeline_id: impl Into<String>) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            pipeline_id: pipeline_id.into(),
            status: ExecutionStatus::Running,
            message: None,
            start_time: Timestamp::now(),
            end_time: None,
            records_processed: 0,
            output_location: None,
            error_message: None,
            error_detail: None,
        }
    }

    /// No-op once the report is terminal.
    pub fn mark_completed(&mut self, records_processed: u64, output_location: String) {
        if self.status.is_terminal() {
            return;
        }
        self.status = ExecutionStatus::Success;
        self.message = Some(SUCCESS_MESSAGE.to_string());
        self.records_processed = records_processed;
        self.output_location = Some(output_location);
        self.end_time = Some(Timestamp::now());
    }

    /// No-op once the report is terminal.
    pub fn mark_failed(&mut self, error: PipelineError) {
        if self.status.is_terminal() {
            return;
        }
        self.status = ExecutionStatus::Failed;
        self.error_message = Some(error.to_string());
        self.error_detail = Some(error.diagnostic_trace());
        self.end_time = Some(Timestamp::now());
    }

    pub fn execution_time(&self) -> Option<SignedDuration> {
        self.end_time.map(|end| end.duration_since(self.start_time))
    }
}
