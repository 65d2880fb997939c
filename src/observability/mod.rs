// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the pipeline engine. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep log wording in one place per subsystem
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Pipeline run lifecycle and per-node events
//! * `messages::connector` - Reads, writes and probes against sources and sinks
//! * `messages::operator` - Row counts and configuration warnings from transforms
//! * `messages::validation` - Structural validation findings
//!
//! # Usage
//!
//! ```rust
//! use etl_pipeline::observability::messages::connector::RowsRead;
//! use etl_pipeline::observability::messages::StructuredLog;
//!
//! RowsRead {
//!     connector: "CSV File",
//!     location: "uploads/employees.csv",
//!     row_count: 3,
//! }
//! .log();
//! ```

pub mod messages;
