//! Loading and saving workbooks.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Workbook;

/// Errors raised while reading or writing a workbook file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),
}

/// Persistence for workbooks.
pub trait WorkbookStore {
    fn load(&self, path: &Path) -> Result<Workbook, StoreError>;

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Filesystem store choosing JSON or YAML by file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl WorkbookStore for FileStore {
    fn load(&self, path: &Path) -> Result<Workbook, StoreError> {
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let workbook = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Yaml => serde_yaml::from_str(&content)?,
        };
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<(), StoreError> {
        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(workbook)?,
            Format::Yaml => serde_yaml::to_string(workbook)?,
        };

        fs::write(path, content).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{colors, CellValue, Fill, Sheet};

    fn sample() -> Workbook {
        let mut sheet = Sheet::new("Activities");
        sheet.set_value(3, 3, 7_i64);
        sheet.set_value(7, 3, "add");
        sheet.set_value(7, 7, 5.0_f64);
        sheet.set_fill(7, 7, Fill::new(colors::PASS));

        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);
        workbook
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");

        FileStore.save(&sample(), &path).unwrap();
        let loaded = FileStore.load(&path).unwrap();

        assert_eq!(loaded, sample());
        let sheet = loaded.sheet("Activities").unwrap();
        assert_eq!(sheet.value(7, 7), &CellValue::Float(5.0));
    }

    #[test]
    fn test_yaml_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.yaml");
        fs::write(
            &path,
            "sheets:\n  - name: Activities\n    cells:\n      3:\n        3:\n          value: 7\n      7:\n        3:\n          value: add\n",
        )
        .unwrap();

        let loaded = FileStore.load(&path).unwrap();
        let sheet = loaded.sheet("Activities").unwrap();
        assert_eq!(sheet.value(3, 3), &CellValue::Int(7));
        assert_eq!(sheet.value(7, 3), &CellValue::text("add"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileStore.load(Path::new("book.xlsx")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = FileStore.load(Path::new("/nonexistent/tabrun/book.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
