//! Experiment configuration.
//!
//! All paths the harness touches are carried here explicitly and passed
//! into every component. The defaults reproduce the directory layout the
//! original experiment setup assumed relative to its working directory.

use std::path::PathBuf;

use crate::OutputPolicy;

/// Name of the tabular result file inside the run destination.
pub const RESULT_FILE_NAME: &str = "rlvector_result.csv";

/// Name of the run metadata file inside the run destination.
pub const RUN_META_FILE_NAME: &str = "run_meta.json";

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Directory holding the benchmark input files.
    pub corpus_dir: PathBuf,

    /// Scratch/build directory handed to the executable as its second
    /// positional argument.
    pub build_dir: PathBuf,

    /// The external benchmark executable.
    pub executable: PathBuf,

    /// Root under which versioned run destinations are allocated.
    pub results_root: PathBuf,

    /// Experiment name, combined with the current date into the
    /// destination directory name.
    pub experiment_name: String,

    /// Staging directory the executable drops diagnostic pages into while
    /// running. Relocated into the destination at the end of the run.
    pub artifacts_source: PathBuf,

    /// Name of the artifacts subdirectory inside the run destination.
    pub artifacts_subdir: String,

    pub output_policy: OutputPolicy,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("benchmark"),
            build_dir: PathBuf::from("benchmark/build"),
            executable: PathBuf::from("./executer/rlvector_experiment"),
            results_root: PathBuf::from("results"),
            experiment_name: "rl_vector_experiment".to_string(),
            artifacts_source: PathBuf::from("HTML"),
            artifacts_subdir: "HTML".to_string(),
            output_policy: OutputPolicy::Fresh,
        }
    }
}

impl ExperimentConfig {
    /// Destination directory name for the given date, without the
    /// collision-avoidance suffix: `<date>_<experiment_name>`.
    pub fn dated_base_name(&self, date: chrono::NaiveDate) -> String {
        format!("{}_{}", date.format("%Y-%m-%d"), self.experiment_name)
    }
}
