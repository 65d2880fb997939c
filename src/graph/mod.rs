// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline graph model: typed nodes, directed edges, ordering and validation.

mod edge;
mod node;
mod ordering;
mod pipeline;
mod validation;

pub use edge::Edge;
pub use node::{Node, NodeConfig, NodeKind, NodeRole};
pub use ordering::{default_order, resolve_order};
pub use pipeline::{Pipeline, UNKNOWN_OUTPUT_LOCATION};
pub use validation::{collect_issues, validate_pipeline, ValidationReport};
