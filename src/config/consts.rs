// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Area probed first for relative CSV source paths
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
/// Fallback area for relative CSV source paths
pub const DEFAULT_SAMPLE_DATA_DIR: &str = "../sample-data";
/// SQLite file used by relational sinks that name no database
pub const DEFAULT_SQLITE_OUTPUT_FILE: &str = "output/pipeline_results.db";
/// Upper bound on a single connection probe, in seconds
pub const DEFAULT_CONNECTION_TEST_TIMEOUT_SECONDS: u64 = 5;
/// Log filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
