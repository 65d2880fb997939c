// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same event with its fields attached.
//!
//! # Organization
//!
//! * `engine` - Pipeline run lifecycle and per-node events
//! * `connector` - Source and sink activity
//! * `operator` - Transform row counts and configuration warnings
//! * `validation` - Structural validation findings
//!
//! # Usage Pattern
//!
//! ```rust
//! use etl_pipeline::observability::messages::engine::NodeStarted;
//!
//! let msg = NodeStarted {
//!     node_id: "filter-1",
//!     node_type: "filter",
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod connector;
pub mod engine;
pub mod operator;
pub mod validation;

/// Emit a message at its natural level with structured fields.
pub trait StructuredLog {
    /// Log the message with its fields attached.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
