// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod cache;
pub mod executor;
pub mod registry;
pub mod report;
#[cfg(test)]
pub mod integration_tests;

pub use cache::DataCache;
pub use executor::SequentialExecutor;
pub use registry::ExecutionRegistry;
pub use report::{ExecutionReport, ExecutionStatus};
