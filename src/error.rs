//! Error types for the harness.
//!
//! Every failure is fatal: the first execution, parse, or filesystem
//! error aborts the run and nothing is persisted. Results accumulated in
//! memory up to that point are discarded.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Top-level error for a harness run.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("benchmark execution failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("result protocol error: {0}")]
    Parse(#[from] ParseError),

    #[error("filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

/// The external benchmark executable could not be run to completion.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// A `RESULT` line did not decode into a complete measurement.
///
/// A missing key and a key whose value is not a number are distinct
/// conditions; both name the offending token.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("result line is missing `{key}=`: {line:?}")]
    MissingKey { key: &'static str, line: String },

    #[error("value {value:?} for `{key}=` is not a number: {source}")]
    MalformedNumber {
        key: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write result table to {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
