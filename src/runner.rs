//! Invocation of the external benchmark executable.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ExecutionError;

/// Run the executable for one benchmark input and capture its stdout.
///
/// The executable is called with positional arguments
/// `[benchmark_file, build_dir]` and blocks the harness until it exits.
/// A spawn failure or a non-zero exit aborts the run; both carry the full
/// invoked command line.
pub fn run_benchmark(
    executable: &Path,
    benchmark_file: &Path,
    build_dir: &Path,
) -> Result<String, ExecutionError> {
    let command = format!(
        "{} {} {}",
        executable.display(),
        benchmark_file.display(),
        build_dir.display()
    );
    debug!(%command, "invoking benchmark executable");

    let output = Command::new(executable)
        .arg(benchmark_file)
        .arg(build_dir)
        .output()
        .map_err(|source| ExecutionError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExecutionError::Failed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn captures_stdout_of_a_successful_run() {
        let dir = tempdir().unwrap();
        let exe = write_stub(dir.path(), "ok.sh", "echo \"input: $1 build: $2\"");
        let out = run_benchmark(&exe, Path::new("corpus/a.bin"), Path::new("build")).unwrap();
        assert_eq!(out, "input: corpus/a.bin build: build\n");
    }

    #[test]
    fn non_zero_exit_reports_command_and_stderr() {
        let dir = tempdir().unwrap();
        let exe = write_stub(dir.path(), "fail.sh", "echo boom >&2; exit 3");
        let err = run_benchmark(&exe, Path::new("a.bin"), Path::new("build")).unwrap_err();
        match err {
            ExecutionError::Failed { command, status, stderr } => {
                assert!(command.contains("a.bin"));
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn unspawnable_executable_reports_spawn_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_exe");
        let err = run_benchmark(&missing, Path::new("a.bin"), Path::new("build")).unwrap_err();
        assert!(matches!(err, ExecutionError::Spawn { .. }));
    }
}
