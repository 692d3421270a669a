use clap::Parser;
use rlvector_harness::config::ExperimentConfig;
use rlvector_harness::harness;
use rlvector_harness::OutputPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rlvector-harness")]
#[command(version)]
#[command(about = "Run the rl-vector benchmark corpus and collect a versioned CSV report")]
struct Args {
    /// Directory holding the benchmark input files.
    #[arg(long, value_name = "DIR", default_value = "benchmark")]
    corpus_dir: PathBuf,

    /// Build/scratch directory passed to the executable as its second
    /// argument.
    #[arg(long, value_name = "DIR", default_value = "benchmark/build")]
    build_dir: PathBuf,

    /// The external benchmark executable.
    #[arg(long, value_name = "FILE", default_value = "./executer/rlvector_experiment")]
    executable: PathBuf,

    /// Root directory for versioned run destinations.
    #[arg(long, value_name = "DIR", default_value = "results")]
    results_root: PathBuf,

    /// Experiment name used in the dated destination directory.
    #[arg(long, default_value = "rl_vector_experiment")]
    name: String,

    /// Staging directory the executable writes diagnostic pages into.
    #[arg(long, value_name = "DIR", default_value = "HTML")]
    artifacts_dir: PathBuf,

    /// Name of the artifacts subdirectory inside the destination.
    #[arg(long, default_value = "HTML")]
    artifacts_subdir: String,

    /// Destination directory policy.
    #[arg(long, value_enum, default_value_t = OutputPolicy::Fresh)]
    output_policy: OutputPolicy,

    /// Enable verbose logging (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rlvector_harness=debug"
    } else {
        "rlvector_harness=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ExperimentConfig {
        corpus_dir: args.corpus_dir,
        build_dir: args.build_dir,
        executable: args.executable,
        results_root: args.results_root,
        experiment_name: args.name,
        artifacts_source: args.artifacts_dir,
        artifacts_subdir: args.artifacts_subdir,
        output_policy: args.output_policy,
    };

    println!("Run-Length Compressed Vector Experiment\n============");
    let summary = harness::run_experiment(&config)?;

    eprintln!(
        "\n{} benchmark file(s), {} record(s), {} artifact(s)",
        summary.benchmarks_run, summary.records, summary.artifacts_moved
    );
    eprintln!("Report written to {}", summary.destination.root().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert()
    }

    #[test]
    fn defaults_match_the_legacy_layout() {
        let args = Args::try_parse_from(["rlvector-harness"]).unwrap();
        assert_eq!(args.corpus_dir, PathBuf::from("benchmark"));
        assert_eq!(args.build_dir, PathBuf::from("benchmark/build"));
        assert_eq!(args.results_root, PathBuf::from("results"));
        assert_eq!(args.output_policy, OutputPolicy::Fresh);
    }

    #[test]
    fn output_policy_is_selectable() {
        let args =
            Args::try_parse_from(["rlvector-harness", "--output-policy", "reuse"]).unwrap();
        assert_eq!(args.output_policy, OutputPolicy::Reuse);
    }
}
