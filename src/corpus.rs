//! Benchmark corpus discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::FilesystemError;

/// List the benchmark input files directly under `corpus_dir`.
///
/// Subdirectories and setup scripts (`.sh` files such as `download.sh`)
/// are skipped. The result is sorted by path so record order is stable
/// across runs over the same corpus. An empty corpus yields an empty vec.
pub fn list_benchmarks(corpus_dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let entries = fs::read_dir(corpus_dir).map_err(|source| FilesystemError::ReadDir {
        path: corpus_dir.to_path_buf(),
        source,
    })?;

    let mut benchmarks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| FilesystemError::ReadDir {
            path: corpus_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if is_setup_script(&path) {
            debug!(path = %path.display(), "skipping setup script");
            continue;
        }
        benchmarks.push(path);
    }
    benchmarks.sort();
    Ok(benchmarks)
}

fn is_setup_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "sh")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_files_excluding_subdirs_and_scripts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.bin"), b"x").unwrap();
        fs::write(dir.path().join("a.bin"), b"x").unwrap();
        fs::write(dir.path().join("download.sh"), b"#!/bin/sh").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.bin"), b"x").unwrap();

        let found = list_benchmarks(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.bin", "b.bin"]);
    }

    #[test]
    fn empty_corpus_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(list_benchmarks(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_corpus_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_benchmarks(&missing).is_err());
    }
}
