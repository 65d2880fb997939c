// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::observability::messages::connector::FileResolved;
use crate::observability::messages::StructuredLog;

/// Locations to probe, in order, for a user-supplied CSV path.
///
/// * `uploads/x`, `/uploads/x`, `\uploads\x`: the uploads area, then sample data
/// * `sample-data/x`, `/sample-data/x`: the sample data area only
/// * absolute paths: as given
/// * any other relative path: the uploads area, then sample data
pub fn candidates(file_path: &str, paths: &PathsConfig) -> Vec<PathBuf> {
    let normalized = file_path.replace('\\', "/");

    if let Some(rest) = strip_area(&normalized, "uploads") {
        return vec![paths.uploads_dir.join(rest), paths.sample_data_dir.join(rest)];
    }
    if let Some(rest) = strip_area(&normalized, "sample-data") {
        return vec![paths.sample_data_dir.join(rest)];
    }
    if Path::new(file_path).is_absolute() {
        return vec![PathBuf::from(file_path)];
    }
    vec![
        paths.uploads_dir.join(file_path),
        paths.sample_data_dir.join(file_path),
    ]
}

fn strip_area<'a>(path: &'a str, area: &str) -> Option<&'a str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed
        .strip_prefix(area)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}

/// First candidate that exists on disk.
pub async fn resolve(file_path: &str, paths: &PathsConfig) -> PipelineResult<PathBuf> {
    let probes = candidates(file_path, paths);

    for candidate in &probes {
        if tokio::fs::metadata(candidate).await.is_ok() {
            FileResolved {
                requested: file_path,
                resolved: candidate,
            }
            .log();
            return Ok(candidate.clone());
        }
    }

    Err(PipelineError::NotFound {
        path: file_path.to_string(),
        candidates: probes.iter().map(|p| p.display().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn areas(root: &Path) -> PathsConfig {
        PathsConfig {
            uploads_dir: root.join("uploads"),
            sample_data_dir: root.join("sample-data"),
        }
    }

    #[test]
    fn test_candidate_rules() {
        let paths = PathsConfig {
            uploads_dir: PathBuf::from("up"),
            sample_data_dir: PathBuf::from("samples"),
        };

        assert_eq!(
            candidates("uploads/a.csv", &paths),
            vec![PathBuf::from("up/a.csv"), PathBuf::from("samples/a.csv")]
        );
        assert_eq!(
            candidates("/uploads/a.csv", &paths),
            candidates("\\uploads\\a.csv", &paths)
        );
        assert_eq!(
            candidates("/sample-data/b.csv", &paths),
            vec![PathBuf::from("samples/b.csv")]
        );
        assert_eq!(
            candidates("/data/c.csv", &paths),
            vec![PathBuf::from("/data/c.csv")]
        );
        assert_eq!(
            candidates("d.csv", &paths),
            vec![PathBuf::from("up/d.csv"), PathBuf::from("samples/d.csv")]
        );
    }

    #[tokio::test]
    async fn test_uploads_win_over_sample_data() {
        let dir = tempfile::tempdir().unwrap();
        let paths = areas(dir.path());
        std::fs::create_dir_all(&paths.uploads_dir).unwrap();
        std::fs::create_dir_all(&paths.sample_data_dir).unwrap();
        std::fs::write(paths.uploads_dir.join("people.csv"), "a\n1\n").unwrap();
        std::fs::write(paths.sample_data_dir.join("people.csv"), "a\n2\n").unwrap();
        std::fs::write(paths.sample_data_dir.join("only.csv"), "a\n3\n").unwrap();

        let resolved = resolve("people.csv", &paths).await.unwrap();
        assert_eq!(resolved, paths.uploads_dir.join("people.csv"));

        let fallback = resolve("only.csv", &paths).await.unwrap();
        assert_eq!(fallback, paths.sample_data_dir.join("only.csv"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve("ghost.csv", &areas(dir.path())).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("ghost.csv"));
    }
}
