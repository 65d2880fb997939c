// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_CONNECTION_TEST_TIMEOUT_SECONDS, DEFAULT_LOG_FILTER, DEFAULT_SAMPLE_DATA_DIR,
    DEFAULT_SQLITE_OUTPUT_FILE, DEFAULT_UPLOADS_DIR,
};
use crate::errors::ConfigLoadError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Engine-wide settings shared by every run.
///
/// Every section is optional; a missing file section falls back to the
/// built-in defaults.
///
/// # Example
/// ```yaml
/// paths:
///   uploads_dir: uploads
///   sample_data_dir: ../sample-data
/// sqlite:
///   output_file: output/pipeline_results.db
/// connections:
///   test_timeout_seconds: 5
/// logging:
///   filter: info
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sqlite: SqliteConfig,
    #[serde(default)]
    pub connections: ConnectionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where relative CSV source paths are looked up.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    #[serde(default = "default_sample_data_dir")]
    pub sample_data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            sample_data_dir: default_sample_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteConfig {
    #[serde(default = "default_sqlite_output_file")]
    pub output_file: PathBuf,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            output_file: default_sqlite_output_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionsConfig {
    #[serde(default = "default_test_timeout_seconds")]
    pub test_timeout_seconds: u64,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            test_timeout_seconds: default_test_timeout_seconds(),
        }
    }
}

impl ConnectionsConfig {
    pub fn test_timeout(&self) -> Duration {
        Duration::from_secs(self.test_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from(DEFAULT_UPLOADS_DIR)
}

fn default_sample_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SAMPLE_DATA_DIR)
}

fn default_sqlite_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_SQLITE_OUTPUT_FILE)
}

fn default_test_timeout_seconds() -> u64 {
    DEFAULT_CONNECTION_TEST_TIMEOUT_SECONDS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Load engine settings, picking the parser from the file extension:
/// `.toml` is TOML, anything else is YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigLoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|source| ConfigLoadError::Toml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigLoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
