//! The orchestration pipeline for one experiment run.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ExperimentConfig;
use crate::corpus;
use crate::error::{FilesystemError, Result};
use crate::output::{self, RunDestination};
use crate::protocol;
use crate::report;
use crate::runner;
use crate::schema::{ResultTable, RunMeta, SCHEMA_VERSION};

#[derive(Debug)]
pub struct RunSummary {
    pub destination: RunDestination,
    pub benchmarks_run: usize,
    pub records: usize,
    pub artifacts_moved: usize,
}

/// Execute the whole pipeline: allocate the destination, enumerate the
/// corpus, run each benchmark through the executable, decode and
/// aggregate its output, then persist the table, artifacts, and run
/// metadata.
///
/// Processing is strictly sequential; each file is run, parsed, and
/// folded into the table before the next starts. The first failure of any
/// stage aborts the run before anything is persisted, discarding the
/// records accumulated in memory so far.
pub fn run_experiment(config: &ExperimentConfig) -> Result<RunSummary> {
    let destination = output::prepare_destination(config)?;

    // The executable drops its diagnostic pages here while running.
    fs::create_dir_all(&config.artifacts_source).map_err(|source| {
        FilesystemError::CreateDir {
            path: config.artifacts_source.clone(),
            source,
        }
    })?;

    let benchmarks = corpus::list_benchmarks(&config.corpus_dir)?;
    if benchmarks.is_empty() {
        warn!(corpus = %config.corpus_dir.display(), "corpus contains no benchmark files");
    }

    let mut table = ResultTable::new();
    for benchmark in &benchmarks {
        let name = display_name(benchmark);
        info!(benchmark = %name, "executing benchmark");

        let raw = runner::run_benchmark(&config.executable, benchmark, &config.build_dir)?;
        let records = protocol::parse_output(&raw)?;
        let appended = table.append_run(records);
        report::print_run_records(&name, appended);
    }

    report::write_table(&table, &destination.result_file())?;
    let artifacts_moved =
        report::collect_artifacts(&config.artifacts_source, destination.artifacts_dir())?;

    let meta = RunMeta {
        schema_version: SCHEMA_VERSION,
        harness_version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
        output_policy: config.output_policy,
        corpus_dir: config.corpus_dir.display().to_string(),
        build_dir: config.build_dir.display().to_string(),
        executable: config.executable.display().to_string(),
        benchmarks: benchmarks.iter().map(|p| display_name(p)).collect(),
        total_records: table.len(),
    };
    report::write_run_meta(&meta, &destination.run_meta_file())?;

    Ok(RunSummary {
        destination,
        benchmarks_run: benchmarks.len(),
        records: table.len(),
        artifacts_moved,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
