//! Persistence of the aggregated results and run artifacts.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::FilesystemError;
use crate::schema::{BenchmarkRecord, ResultTable, RunMeta};

/// Column order of the result table.
pub const CSV_HEADER: [&str; 6] = [
    "Vector",
    "Benchmark",
    "ConstructionTime",
    "SpaceBitsPerElement",
    "RandomAccessTimePerElement",
    "SequentialAccessTimePerElement",
];

/// Serialize the table to CSV at `path`, fixed header, one row per record
/// in table order. The header is written even for an empty table.
pub fn write_table(table: &ResultTable, path: &Path) -> Result<(), FilesystemError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| FilesystemError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    writer.write_record(CSV_HEADER).map_err(|source| FilesystemError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    for record in table.records() {
        writer.serialize(record).map_err(|source| FilesystemError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    writer.flush().map_err(|source| FilesystemError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = table.len(), "result table written");
    Ok(())
}

/// Relocate the diagnostic files the executable dropped into `source_dir`
/// over to `dest_dir`, removing the originals. Returns how many files
/// moved. A missing staging directory means nothing to collect.
pub fn collect_artifacts(source_dir: &Path, dest_dir: &Path) -> Result<usize, FilesystemError> {
    if !source_dir.is_dir() {
        return Ok(0);
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(source_dir).follow_links(false) {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: source_dir.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    for from in &files {
        let to = dest_dir.join(from.file_name().unwrap_or_default());
        move_file(from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "artifact relocated");
    }
    Ok(files.len())
}

/// Rename, falling back to copy + remove when the destination is on a
/// different filesystem.
fn move_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .and_then(|_| fs::remove_file(from))
        .map_err(|source| FilesystemError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Write the run metadata JSON beside the result table.
pub fn write_run_meta(meta: &RunMeta, path: &Path) -> Result<(), FilesystemError> {
    serde_json::to_string_pretty(meta)
        .map_err(io::Error::other)
        .and_then(|json| fs::write(path, json))
        .map_err(|source| FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Print one benchmark file's records as a fixed-width table, for
/// incremental progress reporting while the run is still going.
pub fn print_run_records(benchmark: &str, records: &[BenchmarkRecord]) {
    println!("{benchmark}:");
    println!(
        "  {:<14} {:<18} {:>16} {:>20} {:>20} {:>24}",
        "Vector",
        "Benchmark",
        "ConstructionTime",
        "SpaceBitsPerElement",
        "RandomAccess/Elem",
        "SequentialAccess/Elem"
    );
    for record in records {
        println!(
            "  {:<14} {:<18} {:>16.6} {:>20.6} {:>20.6} {:>24.6}",
            record.vector,
            record.benchmark,
            record.construction_time,
            record.space_bits_per_element,
            record.random_access_time_per_element,
            record.sequential_access_time_per_element,
        );
    }
}
