// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // csv / sql / placeholder connectors
pub mod config;     // engine configuration
pub mod engine;     // sequential executor + reports
pub mod errors;     // error handling
pub mod graph;      // pipeline model, ordering, validation
pub mod observability;
pub mod operators;  // filter / map / groupBy / sort / join
pub mod table;      // row + value model
pub mod traits;     // unified abstractions
