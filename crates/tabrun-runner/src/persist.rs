//! Saving the annotated workbook as a timestamped artifact.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::workbook::{StoreError, Workbook, WorkbookStore};

/// Timestamp appended to artifact names.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "_results_[%Y.%m.%d_%H.%M.%S]";

const DEFAULT_EXTENSION: &str = "json";

/// Artifact path for `input` saved at `now`, before collision handling.
pub fn artifact_path(input: &Path, results_dir: &Path, now: DateTime<Local>) -> PathBuf {
    artifact_candidate(input, results_dir, now, 0)
}

fn artifact_candidate(input: &Path, results_dir: &Path, now: DateTime<Local>, attempt: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "workbook".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let mut name = format!("{}{}", stem, now.format(ARTIFACT_TIMESTAMP_FORMAT));
    if attempt > 0 {
        name.push_str(&format!("_{}", attempt));
    }

    results_dir.join(format!("{}.{}", name, extension))
}

/// Save `workbook` under `results_dir`, creating it if needed.
///
/// Never overwrites an existing file: a numeric suffix is added when two
/// saves land on the same second.
pub fn persist<S: WorkbookStore + ?Sized>(
    store: &S,
    workbook: &Workbook,
    input: &Path,
    results_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, EngineError> {
    fs::create_dir_all(results_dir).map_err(|source| StoreError::Io {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let mut attempt = 0;
    let path = loop {
        let candidate = artifact_candidate(input, results_dir, now, attempt);
        if !candidate.exists() {
            break candidate;
        }
        attempt += 1;
    };

    store.save(workbook, &path)?;
    tracing::info!(path = %path.display(), "Saved results");

    Ok(path)
}
