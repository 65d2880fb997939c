// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Connector implementations for pipeline sources and sinks.
//!
//! Every connector implements the [`Connector`](crate::traits::Connector)
//! trait and is built per node through [`ConnectorFactory`].
//!
//! # Available Backends
//!
//! ## CSV
//! Delimited files on local disk:
//! - **Source**: header-first parsing with backslash-aware quote toggling,
//!   path lookup across the uploads and sample-data areas
//! - **Output**: union-of-keys header, quoting only when needed
//!
//! ## SQL
//! SQLite, MySQL and PostgreSQL through the sqlx `Any` driver:
//! - **Source**: explicit query or `SELECT * FROM <table>`, schema from a prepared statement
//! - **Output**: drop and recreate the table with types sampled from the first row
//!
//! ## Placeholders
//! JSON file and REST kinds are recognized but every read and write fails
//! with `UnsupportedOperation`.
//!
//! ## Stub Backend (Test-Only)
//! In-memory connectors for executor tests (only available in test builds).
//!
//! # Architecture
//!
//! ```text
//! Node type tag → ConnectorKind → ConnectorFactory → Box<dyn Connector> → Executor
//! ```

pub mod csv;
pub mod factory;
pub mod placeholders;
pub mod sql;
#[cfg(test)]
pub mod stub;

pub use factory::{ConnectorFactory, ConnectorKind};
