//! Allocation of the versioned run destination.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ExperimentConfig, RESULT_FILE_NAME, RUN_META_FILE_NAME};
use crate::error::FilesystemError;
use crate::OutputPolicy;

/// The directory allocated to hold one run's report and artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDestination {
    root: PathBuf,
    artifacts: PathBuf,
}

impl RunDestination {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts
    }

    pub fn result_file(&self) -> PathBuf {
        self.root.join(RESULT_FILE_NAME)
    }

    pub fn run_meta_file(&self) -> PathBuf {
        self.root.join(RUN_META_FILE_NAME)
    }
}

/// Allocate the run destination according to the configured policy, using
/// today's date for the directory stamp.
pub fn prepare_destination(config: &ExperimentConfig) -> Result<RunDestination, FilesystemError> {
    let base = config.dated_base_name(chrono::Local::now().date_naive());
    let dest = match config.output_policy {
        OutputPolicy::Fresh => allocate_fresh(&config.results_root, &base, &config.artifacts_subdir)?,
        OutputPolicy::Reuse => reuse_dated(&config.results_root, &base, &config.artifacts_subdir)?,
    };
    info!(destination = %dest.root().display(), policy = config.output_policy.as_str(), "run destination ready");
    Ok(dest)
}

/// Probe `<results_root>/<base>_<idx>` for idx = 0, 1, ... until an unused
/// path is found, then create it together with its artifacts subdirectory.
///
/// Sequential allocations within one process never return the same path.
/// Concurrent allocation from independent processes is not defended
/// against; the harness assumes sequential single-user use.
pub fn allocate_fresh(
    results_root: &Path,
    base: &str,
    artifacts_subdir: &str,
) -> Result<RunDestination, FilesystemError> {
    fs::create_dir_all(results_root).map_err(|source| FilesystemError::CreateDir {
        path: results_root.to_path_buf(),
        source,
    })?;

    let mut idx = 0u32;
    let root = loop {
        let candidate = results_root.join(format!("{base}_{idx}"));
        if !candidate.exists() {
            break candidate;
        }
        idx += 1;
    };

    create_destination(root, artifacts_subdir)
}

/// Use the single dated directory `<results_root>/<base>`, clearing any
/// contents left by an earlier run on the same day.
pub fn reuse_dated(
    results_root: &Path,
    base: &str,
    artifacts_subdir: &str,
) -> Result<RunDestination, FilesystemError> {
    let root = results_root.join(base);
    if root.exists() {
        clear_directory(&root)?;
        let artifacts = root.join(artifacts_subdir);
        fs::create_dir_all(&artifacts).map_err(|source| FilesystemError::CreateDir {
            path: artifacts.clone(),
            source,
        })?;
        Ok(RunDestination { root, artifacts })
    } else {
        create_destination(root, artifacts_subdir)
    }
}

fn create_destination(
    root: PathBuf,
    artifacts_subdir: &str,
) -> Result<RunDestination, FilesystemError> {
    let artifacts = root.join(artifacts_subdir);
    fs::create_dir_all(&artifacts).map_err(|source| FilesystemError::CreateDir {
        path: artifacts.clone(),
        source,
    })?;
    Ok(RunDestination { root, artifacts })
}

/// Remove everything inside `dir`, keeping `dir` itself.
fn clear_directory(dir: &Path) -> Result<(), FilesystemError> {
    let entries = fs::read_dir(dir).map_err(|source| FilesystemError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| FilesystemError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|source| FilesystemError::Remove { path, source })?;
    }
    Ok(())
}
