//! Runner configuration.
//!
//! The layout fields describe where the engine finds its inputs in a
//! document.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::workbook::CellRef;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Row holding the column headers.
    pub header_row: u32,

    /// Last column scanned for headers.
    pub max_column: u32,

    /// Cell holding the first row to execute.
    pub start_row_cell: CellRef,

    /// Cell holding the last row to execute.
    pub end_row_cell: CellRef,

    /// Row painted with the results stripe on every sheet.
    pub stripe_row: u32,

    /// Number of columns covered by the results stripe.
    pub stripe_columns: u32,

    /// Directory receiving result artifacts.
    pub results_dir: PathBuf,

    /// Tab executed when none is given.
    pub tab: String,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let number = |key: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => match value.trim().parse::<u32>() {
                    Ok(n) if n > 0 => Ok(n),
                    _ => Err(ConfigError::InvalidNumber { key, value }),
                },
            }
        };

        let cell = |key: &'static str, default: CellRef| -> Result<CellRef, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value
                    .parse()
                    .map_err(|source| ConfigError::InvalidCellRef { key, source }),
            }
        };

        Ok(Self {
            header_row: number("TABRUN_HEADER_ROW", defaults.header_row)?,
            max_column: number("TABRUN_MAX_COLUMN", defaults.max_column)?,
            start_row_cell: cell("TABRUN_START_CELL", defaults.start_row_cell)?,
            end_row_cell: cell("TABRUN_END_CELL", defaults.end_row_cell)?,
            stripe_row: number("TABRUN_STRIPE_ROW", defaults.stripe_row)?,
            stripe_columns: number("TABRUN_STRIPE_COLUMNS", defaults.stripe_columns)?,
            results_dir: lookup("TABRUN_RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.results_dir),
            tab: lookup("TABRUN_TAB").unwrap_or(defaults.tab),
        })
    }

    /// Results directory under the current working directory.
    fn default_results_dir() -> PathBuf {
        std::env::current_dir()
            .map(|cwd| cwd.join("results"))
            .unwrap_or_else(|_| PathBuf::from("results"))
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            header_row: 6,
            max_column: 20,
            start_row_cell: CellRef::new(3, 3),
            end_row_cell: CellRef::new(4, 3),
            stripe_row: 1,
            stripe_columns: 17,
            results_dir: Self::default_results_dir(),
            tab: "Activities".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = RunnerConfig::default();
        assert_eq!(config.header_row, 6);
        assert_eq!(config.max_column, 20);
        assert_eq!(config.start_row_cell.to_string(), "C3");
        assert_eq!(config.end_row_cell.to_string(), "C4");
        assert_eq!(config.tab, "Activities");
        assert!(config.results_dir.ends_with("results"));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = RunnerConfig::from_lookup(lookup(&[
            ("TABRUN_HEADER_ROW", "2"),
            ("TABRUN_START_CELL", "B1"),
            ("TABRUN_RESULTS_DIR", "/tmp/out"),
            ("TABRUN_TAB", "Smoke"),
        ]))
        .unwrap();

        assert_eq!(config.header_row, 2);
        assert_eq!(config.start_row_cell, CellRef::new(1, 2));
        assert_eq!(config.end_row_cell, CellRef::new(4, 3));
        assert_eq!(config.results_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.tab, "Smoke");
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = RunnerConfig::from_lookup(lookup(&[("TABRUN_MAX_COLUMN", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "TABRUN_MAX_COLUMN", .. }));

        let err = RunnerConfig::from_lookup(lookup(&[("TABRUN_HEADER_ROW", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = RunnerConfig::from_lookup(lookup(&[("TABRUN_END_CELL", "4C")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCellRef { key: "TABRUN_END_CELL", .. }));
    }
}
