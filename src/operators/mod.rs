// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stateless table transforms backing the `filter`, `map`, `groupBy`, `sort`
//! and `join` node types.
//!
//! Each operator has a config struct parsed from the node's configuration bag
//! and a pure `apply` over borrowed tables. Comparisons go through the string
//! form of [`Value`](crate::table::Value) unless stated otherwise.

pub mod filter;
pub mod group_by;
pub mod join;
pub mod map;
pub mod sort;

pub use filter::{FilterConfig, FilterOperator};
pub use group_by::{Aggregation, GroupByConfig};
pub use join::{JoinConfig, JoinType};
pub use map::{MapOperation, MapConfig, Mapping};
pub use sort::{SortConfig, SortDirection};
