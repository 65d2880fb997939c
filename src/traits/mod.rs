// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod connector;
pub mod executor;

pub use connector::Connector;
pub use executor::PipelineExecutor;
