// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod load;
mod pipeline;

pub use config::ValidationIssue;
pub use load::ConfigLoadError;
pub use pipeline::{ErrorKind, PipelineError};

/// Result alias used across connectors, operators and the executor.
pub type PipelineResult<T> = Result<T, PipelineError>;
